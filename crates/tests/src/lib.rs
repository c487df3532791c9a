//! # Integration Tests
//!
//! End-to-end tests over the full file → classifier → dispatcher → sinks
//! path, on real temp directories.

#[cfg(test)]
mod contract_tests {
    use classifier::LineClassifier;
    use contracts::SingletonAnchor;

    #[test]
    fn test_contracts_compile() {
        let _ = contracts::OutputLayout::Split;
    }

    /// classify is total and deterministic over arbitrary text.
    #[test]
    fn test_classify_total_and_deterministic() {
        let c = LineClassifier::new(SingletonAnchor::Prefix);
        for line in [
            "",
            " ",
            "\t",
            "1",
            "1 2",
            "1 2 3",
            "1.0 2.0 3.0",
            "x y z",
            "-1.0 2.0 3.0",
            "1.234D+05 1.0 2.0",
        ] {
            assert_eq!(c.classify(line), c.classify(line));
        }
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::path::Path;

    use contracts::OutputLayout;
    use dispatcher::{create_dispatcher, ConversionReport, DispatcherConfig, DispatcherError};
    use tempfile::{tempdir, TempDir};

    fn config(dir: &Path, layout: OutputLayout) -> DispatcherConfig {
        DispatcherConfig {
            input: dir.join("mesh.ver"),
            output_dir: dir.to_path_buf(),
            base_name: "mesh".to_string(),
            layout,
            queue_capacity: 100,
        }
    }

    async fn convert(
        input: &str,
        layout: OutputLayout,
    ) -> (TempDir, Result<ConversionReport, DispatcherError>) {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("mesh.ver"), input).unwrap();

        let result = match create_dispatcher(config(dir.path(), layout)).await {
            Ok(dispatcher) => dispatcher.run().await,
            Err(e) => Err(e),
        };
        (dir, result)
    }

    fn read(dir: &TempDir, name: &str) -> String {
        std::fs::read_to_string(dir.path().join(name)).unwrap()
    }

    /// Scenario: one line of each shape lands in exactly one destination.
    #[tokio::test]
    async fn test_e2e_split_conversion() {
        let (dir, result) = convert("1.0 2.0 3.0\n1 2 3\n5\n", OutputLayout::Split).await;
        let report = result.unwrap();

        assert_eq!(report.lines_read, 3);
        assert_eq!(report.records_routed, 2);
        assert_eq!(report.singletons_dropped, 1);

        assert_eq!(read(&dir, "coords-mesh.plt"), "1.0\t2.0\t3.0\n");
        assert_eq!(read(&dir, "idxs-mesh.plt"), "0\t1\t2\n");
    }

    /// Scenario: an unrecognized line aborts the whole run.
    #[tokio::test]
    async fn test_e2e_unrecognized_line_aborts() {
        let (_dir, result) = convert("1.0 2.0 3.0\nabc\n", OutputLayout::Split).await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("abc"), "diagnostic was: {err}");
    }

    /// Scenario: a 0 index underflows the 1-based to 0-based shift and
    /// aborts the run rather than wrapping.
    #[tokio::test]
    async fn test_e2e_zero_index_aborts() {
        let (_dir, result) = convert("0 1 2\n", OutputLayout::Split).await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("'0'"), "diagnostic was: {err}");
    }

    /// Combined layout: header row first, coordinates after, indices in
    /// their own file.
    #[tokio::test]
    async fn test_e2e_combined_conversion() {
        let input = "4 2\n1.0 2.0 3.0\n4.0 5.0 6.0\n1 2 3\n2 3 4\n1\n";
        let (dir, result) = convert(input, OutputLayout::Combined).await;
        let report = result.unwrap();

        assert_eq!(report.lines_read, 6);
        assert_eq!(read(&dir, "mesh.plt"), "4\t2\n1.0\t2.0\t3.0\n4.0\t5.0\t6.0\n");
        assert_eq!(read(&dir, "idxs-mesh.plt"), "0\t1\t2\n1\t2\t3\n");
    }

    /// Coordinate tokens survive byte-identical, including engineering
    /// exponents and uneven precision.
    #[tokio::test]
    async fn test_e2e_coordinate_precision_round_trip() {
        let input = "1.234D+05 -0.000100 9.9e-3\n2.5E2 3.00 -4.250\n";
        let (dir, result) = convert(input, OutputLayout::Split).await;
        result.unwrap();

        assert_eq!(
            read(&dir, "coords-mesh.plt"),
            "1.234D+05\t-0.000100\t9.9e-3\n2.5E2\t3.00\t-4.250\n"
        );
    }

    /// Per-category order matches input order even under a tiny queue.
    #[tokio::test]
    async fn test_e2e_order_preserved_under_backpressure() {
        let dir = tempdir().unwrap();
        let mut input = String::new();
        for i in 1..=500u32 {
            input.push_str(&format!("{i}.0 0.0 0.0\n"));
            input.push_str(&format!("{i} {i} {i}\n"));
        }
        std::fs::write(dir.path().join("mesh.ver"), &input).unwrap();

        let mut cfg = config(dir.path(), OutputLayout::Split);
        cfg.queue_capacity = 2;
        let report = create_dispatcher(cfg).await.unwrap().run().await.unwrap();
        assert_eq!(report.lines_read, 1000);

        let coords = read(&dir, "coords-mesh.plt");
        let expected: String = (1..=500u32).map(|i| format!("{i}.0\t0.0\t0.0\n")).collect();
        assert_eq!(coords, expected);

        let idxs = read(&dir, "idxs-mesh.plt");
        let expected: String = (1..=500u32)
            .map(|i| format!("{j}\t{j}\t{j}\n", j = i - 1))
            .collect();
        assert_eq!(idxs, expected);
    }

    /// Every sink acknowledges exactly once per run.
    #[tokio::test]
    async fn test_e2e_one_ack_per_sink() {
        let (_dir, result) = convert("1.0 2.0 3.0\n1 2 3\n", OutputLayout::Split).await;
        let report = result.unwrap();

        assert_eq!(report.sinks.len(), 2);
        let mut names: Vec<&str> = report.sinks.iter().map(|s| s.name.as_str()).collect();
        names.sort();
        assert_eq!(names, ["coordinates", "indices"]);
    }

    /// Re-running on unchanged input yields byte-identical outputs.
    #[tokio::test]
    async fn test_e2e_idempotent_reruns() {
        let dir = tempdir().unwrap();
        let input = "2 3\n1.0 2.0 3.0\n1 2 3\n7\n";
        std::fs::write(dir.path().join("mesh.ver"), input).unwrap();

        let mut outputs = Vec::new();
        for _ in 0..2 {
            create_dispatcher(config(dir.path(), OutputLayout::Split))
                .await
                .unwrap()
                .run()
                .await
                .unwrap();
            outputs.push((read(&dir, "coords-mesh.plt"), read(&dir, "idxs-mesh.plt")));
        }
        assert_eq!(outputs[0], outputs[1]);
    }

    /// CRLF input splits like LF input.
    #[tokio::test]
    async fn test_e2e_crlf_line_endings() {
        let (dir, result) = convert("1.0 2.0 3.0\r\n1 2 3\r\n", OutputLayout::Split).await;
        result.unwrap();

        assert_eq!(read(&dir, "coords-mesh.plt"), "1.0\t2.0\t3.0\n");
        assert_eq!(read(&dir, "idxs-mesh.plt"), "0\t1\t2\n");
    }

    /// Missing input surfaces as an IO error before any destination exists.
    #[tokio::test]
    async fn test_e2e_missing_input_is_io_error() {
        let dir = tempdir().unwrap();
        let err = match create_dispatcher(config(dir.path(), OutputLayout::Split)).await {
            Ok(_) => panic!("expected open failure"),
            Err(e) => e,
        };
        assert!(matches!(err, DispatcherError::Io(_)));
    }
}
