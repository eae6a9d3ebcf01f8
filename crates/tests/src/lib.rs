//! # Integration Tests
//!
//! End-to-end scenarios over the full pipeline: in-memory stream → registry
//! → run loop → files on disk.

#[cfg(test)]
mod e2e_tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use codec::{encode_frame, LogEntry};
    use session::{MemoryStreamFactory, SessionRegistry, SessionState};
    use tempfile::TempDir;
    use tokio::io::{AsyncWriteExt, DuplexStream};

    fn entry(source: &str, line: &[u8]) -> LogEntry {
        LogEntry {
            source: source.to_string(),
            time_nano: 1_700_000_000_000_000_000,
            line: line.to_vec(),
            partial: false,
        }
    }

    fn options(dir: &TempDir) -> HashMap<String, String> {
        HashMap::from([
            (
                "stdout".to_string(),
                dir.path().join("out.log").display().to_string(),
            ),
            (
                "stderr".to_string(),
                dir.path().join("err.log").display().to_string(),
            ),
        ])
    }

    fn registry_with_stream(id: &str) -> (SessionRegistry<MemoryStreamFactory>, DuplexStream) {
        let (tx, rx) = tokio::io::duplex(64 * 1024);
        let streams = MemoryStreamFactory::new();
        streams.insert(id, rx);
        (SessionRegistry::new(streams), tx)
    }

    /// Poll until the file at `path` has the expected contents.
    async fn wait_for_contents(path: &std::path::Path, expected: &[u8]) {
        for _ in 0..200 {
            if std::fs::read(path).map(|c| c == expected).unwrap_or(false) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!(
            "file {} never reached expected contents {:?}",
            path.display(),
            String::from_utf8_lossy(expected)
        );
    }

    /// The reference scenario: two frames, one per channel, exact file
    /// contents afterwards.
    #[tokio::test]
    async fn test_two_frames_split_across_sinks() {
        let dir = TempDir::new().unwrap();
        let (registry, mut tx) = registry_with_stream("/tmp/s1");

        registry.start("/tmp/s1", &options(&dir)).await.unwrap();

        tx.write_all(&encode_frame(&entry("stdout", b"hello\n")))
            .await
            .unwrap();
        tx.write_all(&encode_frame(&entry("stderr", b"oops\n")))
            .await
            .unwrap();
        drop(tx);

        wait_for_contents(&dir.path().join("out.log"), b"hello\n").await;
        wait_for_contents(&dir.path().join("err.log"), b"oops\n").await;

        let state = registry.stop_and_wait("/tmp/s1").await;
        assert_eq!(state, Some(SessionState::Closed));

        assert_eq!(std::fs::read(dir.path().join("out.log")).unwrap(), b"hello\n");
        assert_eq!(std::fs::read(dir.path().join("err.log")).unwrap(), b"oops\n");
    }

    /// Channel isolation under interleaving: payloads stay in decode order
    /// within each sink and never cross over.
    #[tokio::test]
    async fn test_interleaved_channels_preserve_order() {
        let dir = TempDir::new().unwrap();
        let (registry, mut tx) = registry_with_stream("/tmp/s1");

        registry.start("/tmp/s1", &options(&dir)).await.unwrap();

        for i in 0..5u8 {
            let out_line = format!("out-{i}\n");
            let err_line = format!("err-{i}\n");
            tx.write_all(&encode_frame(&entry("stdout", out_line.as_bytes())))
                .await
                .unwrap();
            tx.write_all(&encode_frame(&entry("stderr", err_line.as_bytes())))
                .await
                .unwrap();
        }
        drop(tx);

        wait_for_contents(
            &dir.path().join("out.log"),
            b"out-0\nout-1\nout-2\nout-3\nout-4\n",
        )
        .await;
        wait_for_contents(
            &dir.path().join("err.log"),
            b"err-0\nerr-1\nerr-2\nerr-3\nerr-4\n",
        )
        .await;

        registry.stop_and_wait("/tmp/s1").await;
    }

    /// A record with an unrecognized channel tag is dropped; the next frame
    /// flows normally.
    #[tokio::test]
    async fn test_unknown_tag_drops_only_that_record() {
        let dir = TempDir::new().unwrap();
        let (registry, mut tx) = registry_with_stream("/tmp/s1");

        registry.start("/tmp/s1", &options(&dir)).await.unwrap();

        tx.write_all(&encode_frame(&entry("trace", b"invisible\n")))
            .await
            .unwrap();
        tx.write_all(&encode_frame(&entry("stdout", b"visible\n")))
            .await
            .unwrap();

        wait_for_contents(&dir.path().join("out.log"), b"visible\n").await;

        let snapshot = registry.metrics("/tmp/s1").await.unwrap();
        assert_eq!(snapshot.dropped_records, 1);
        assert_eq!(snapshot.stdout_records, 1);
        assert_eq!(
            std::fs::read(dir.path().join("err.log")).unwrap(),
            b"",
            "dropped payload must not leak into the other sink"
        );

        drop(tx);
        registry.stop_and_wait("/tmp/s1").await;
    }

    /// One malformed frame inside a well-formed stream: decoding resumes and
    /// later records are still delivered in order.
    #[tokio::test]
    async fn test_resync_after_malformed_frame() {
        let dir = TempDir::new().unwrap();
        let (registry, mut tx) = registry_with_stream("/tmp/s1");

        registry.start("/tmp/s1", &options(&dir)).await.unwrap();

        tx.write_all(&encode_frame(&entry("stdout", b"first\n")))
            .await
            .unwrap();
        // Valid length prefix, invalid protobuf body.
        tx.write_all(&1u32.to_be_bytes()).await.unwrap();
        tx.write_all(&[0xFF]).await.unwrap();
        tx.write_all(&encode_frame(&entry("stdout", b"second\n")))
            .await
            .unwrap();
        drop(tx);

        wait_for_contents(&dir.path().join("out.log"), b"first\nsecond\n").await;
        registry.stop_and_wait("/tmp/s1").await;
    }

    /// Stopping mid-run closes the loop without dispatching frames that were
    /// written but never decoded.
    #[tokio::test]
    async fn test_stop_mid_run_discards_buffered_frames() {
        let dir = TempDir::new().unwrap();
        let (registry, mut tx) = registry_with_stream("/tmp/s1");

        registry.start("/tmp/s1", &options(&dir)).await.unwrap();

        tx.write_all(&encode_frame(&entry("stdout", b"hello\n")))
            .await
            .unwrap();
        wait_for_contents(&dir.path().join("out.log"), b"hello\n").await;

        let state = registry.stop_and_wait("/tmp/s1").await;
        assert_eq!(state, Some(SessionState::Closed));
        assert!(!registry.is_active("/tmp/s1").await);

        // Frames queued after closure never reach the sinks.
        let _ = tx
            .write_all(&encode_frame(&entry("stdout", b"too late\n")))
            .await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(std::fs::read(dir.path().join("out.log")).unwrap(), b"hello\n");
    }

    /// An oversized frame costs itself, not the session.
    #[tokio::test]
    async fn test_oversized_frame_is_skipped() {
        let dir = TempDir::new().unwrap();
        let (registry, mut tx) = registry_with_stream("/tmp/s1");

        registry.start("/tmp/s1", &options(&dir)).await.unwrap();

        tx.write_all(&(2_000_000u32).to_be_bytes()).await.unwrap();
        tx.write_all(&encode_frame(&entry("stdout", b"survived\n")))
            .await
            .unwrap();
        drop(tx);

        wait_for_contents(&dir.path().join("out.log"), b"survived\n").await;
        registry.stop_and_wait("/tmp/s1").await;
    }

    /// Natural end-of-stream finishes the loop but keeps the identifier
    /// registered until an explicit stop.
    #[tokio::test]
    async fn test_eof_requires_explicit_stop() {
        let dir = TempDir::new().unwrap();
        let (registry, mut tx) = registry_with_stream("/tmp/s1");

        registry.start("/tmp/s1", &options(&dir)).await.unwrap();

        tx.write_all(&encode_frame(&entry("stdout", b"done\n")))
            .await
            .unwrap();
        drop(tx);

        wait_for_contents(&dir.path().join("out.log"), b"done\n").await;
        assert!(registry.is_active("/tmp/s1").await);

        registry.stop("/tmp/s1").await;
        assert!(!registry.is_active("/tmp/s1").await);
    }

    /// Sessions run and tear down independently.
    #[tokio::test]
    async fn test_concurrent_sessions_are_independent() {
        let dir_a = TempDir::new().unwrap();
        let dir_b = TempDir::new().unwrap();

        let streams = MemoryStreamFactory::new();
        let (mut tx_a, rx_a) = tokio::io::duplex(4096);
        let (mut tx_b, rx_b) = tokio::io::duplex(4096);
        streams.insert("/tmp/a", rx_a);
        streams.insert("/tmp/b", rx_b);
        let registry = SessionRegistry::new(streams);

        registry.start("/tmp/a", &options(&dir_a)).await.unwrap();
        registry.start("/tmp/b", &options(&dir_b)).await.unwrap();

        tx_a.write_all(&encode_frame(&entry("stdout", b"from a\n")))
            .await
            .unwrap();
        tx_b.write_all(&encode_frame(&entry("stdout", b"from b\n")))
            .await
            .unwrap();
        drop(tx_a);

        wait_for_contents(&dir_a.path().join("out.log"), b"from a\n").await;
        registry.stop_and_wait("/tmp/a").await;
        assert!(!registry.is_active("/tmp/a").await);
        assert!(registry.is_active("/tmp/b").await);

        // Session b keeps flowing after a is gone.
        tx_b.write_all(&encode_frame(&entry("stderr", b"still here\n")))
            .await
            .unwrap();
        drop(tx_b);
        wait_for_contents(&dir_b.path().join("err.log"), b"still here\n").await;
        registry.stop_and_wait("/tmp/b").await;

        assert_eq!(std::fs::read(dir_a.path().join("out.log")).unwrap(), b"from a\n");
        assert_eq!(std::fs::read(dir_b.path().join("out.log")).unwrap(), b"from b\n");
        assert_eq!(
            std::fs::read(dir_b.path().join("err.log")).unwrap(),
            b"still here\n"
        );
    }
}
