// File: crates/scaling-core/tests/common/mod.rs
// Purpose: Shared fixtures: a small chip table and chart settings over it.

#![allow(dead_code)]

use scaling_core::{ChartSettings, LabelPlacement, Record, RecordTable};

pub const BW: &str = "mem_bw_GBs";
pub const FLOPS: &str = "fp32_peak_compute_Gflops";

/// Three chips dated 2010, 2012, 2015 (given out of order).
/// Bandwidth 100/200/800 normalizes to 1/2/8.
pub fn chip_table() -> RecordTable {
    let records = vec![
        Record::new("01.01.2015", Some(2015.0))
            .with_name("Chip C")
            .with_text("mem_type", "HBM2e")
            .with_metric(BW, Some(800.0))
            .with_metric(FLOPS, Some(1000.0))
            .with_label(BW, LabelPlacement::Above)
            .with_label(FLOPS, LabelPlacement::Below),
        Record::new("01.01.2010", Some(2010.0))
            .with_name("Chip A")
            .with_text("mem_type", "GDDR5")
            .with_metric(BW, Some(100.0))
            .with_metric(FLOPS, Some(10.0))
            .with_label(BW, LabelPlacement::Below),
        Record::new("01.01.2012", Some(2012.0))
            .with_name("Chip B")
            .with_text("mem_type", "HBM")
            .with_metric(BW, Some(200.0))
            .with_metric(FLOPS, Some(40.0)),
    ];
    RecordTable::new(records, vec![BW.to_string(), FLOPS.to_string()])
}

/// Bandwidth (diamond, firebrick) and FP32 compute (circle, royalblue).
pub fn two_series(name: &str) -> ChartSettings {
    let mut s = ChartSettings::new(name)
        .with_metric(BW, "Memory Bandwidth (GB/s)", "D", "firebrick")
        .with_metric(FLOPS, "FP32 Peak Compute (GFLOPS)", "o", "royalblue");
    s.title = Some("Compute vs. Bandwidth".into());
    s.annotation_text.insert(format!("norm_{BW}"), "mem_type".into());
    s
}

/// Fresh, empty directory under `target/test_out/`.
pub fn out_dir(name: &str) -> std::path::PathBuf {
    let dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("target/test_out").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}
