//! End-to-end tests over a real store fixture.
//!
//! Each test materializes a small record store in a temporary directory,
//! reopens it read-only through `OcrDataset`, and exercises the full read
//! path: key resolution, image decoding, corrupt-record skipping, label
//! validation, and normalization.

use image::{ImageFormat, Rgb, RgbImage};
use ocr_dataset::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tempfile::TempDir;

fn png_bytes(color: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(6, 4, Rgb(color));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .expect("png encode");
    buf.into_inner()
}

fn write_store(dir: &Path, records: &[(Vec<u8>, &[u8])]) {
    let mut opts = rocksdb::Options::default();
    opts.create_if_missing(true);
    let db = rocksdb::DB::open(&opts, dir).expect("create fixture store");
    db.put(b"num-samples", records.len().to_string().as_bytes())
        .expect("put num-samples");
    for (i, (image, label)) in records.iter().enumerate() {
        let id = i + 1;
        db.put(format!("image-{id:09}").as_bytes(), image)
            .expect("put image");
        db.put(format!("label-{id:09}").as_bytes(), label)
            .expect("put label");
    }
}

fn open_plain(dir: &Path, cap: u64) -> OcrDataset {
    OcrDataset::open(dir, DatasetView::Plain { cap }, &DatasetConfig::default())
        .expect("open dataset")
}

#[test]
fn reads_samples_in_logical_order() {
    let tmp = TempDir::new().unwrap();
    write_store(
        tmp.path(),
        &[
            (png_bytes([10, 0, 0]), b"AB"),
            (png_bytes([0, 10, 0]), b"CD"),
        ],
    );

    let dataset = open_plain(tmp.path(), 100);
    assert_eq!(dataset.len(), 2);

    let first = dataset.get(0).unwrap();
    assert_eq!(first.record_id, 1);
    assert_eq!(first.text, "AB");
    assert_eq!(first.image.dimensions(), (6, 4));

    let texts: Vec<String> = dataset
        .iter()
        .map(|sample| sample.unwrap().text)
        .collect();
    assert_eq!(texts, vec!["AB".to_string(), "CD".to_string()]);
}

#[test]
fn plain_cap_bounds_the_view() {
    let tmp = TempDir::new().unwrap();
    let records: Vec<(Vec<u8>, &[u8])> =
        (0..5).map(|_| (png_bytes([1, 2, 3]), b"x".as_slice())).collect();
    write_store(tmp.path(), &records);

    assert_eq!(open_plain(tmp.path(), 3).len(), 3);
    assert_eq!(open_plain(tmp.path(), 50).len(), 5);
}

#[test]
fn corrupt_image_is_skipped_to_the_next_record() {
    let tmp = TempDir::new().unwrap();
    write_store(
        tmp.path(),
        &[
            (png_bytes([10, 0, 0]), b"AB"),
            (b"not an image".to_vec(), b"XX"),
            (png_bytes([0, 0, 10]), b"CD"),
        ],
    );

    let dataset = open_plain(tmp.path(), 10);
    let sample = dataset.get(1).unwrap();
    assert_eq!(sample.record_id, 3);
    assert_eq!(sample.text, "CD");
}

#[test]
fn skip_window_exhaustion_reports_image_decode() {
    let tmp = TempDir::new().unwrap();
    write_store(
        tmp.path(),
        &[
            (png_bytes([10, 0, 0]), b"AB"),
            (b"garbage".to_vec(), b"XX"),
            (b"more garbage".to_vec(), b"YY"),
        ],
    );

    let dataset = open_plain(tmp.path(), 10);
    let err = dataset.get(1).unwrap_err();
    match err {
        DatasetError::ImageDecode {
            record_id,
            attempts,
            ..
        } => {
            assert_eq!(record_id, 2);
            assert_eq!(attempts, 2);
        }
        other => panic!("expected ImageDecode, got {other:?}"),
    }
}

#[test]
fn empty_label_is_fatal() {
    let tmp = TempDir::new().unwrap();
    write_store(tmp.path(), &[(png_bytes([5, 5, 5]), b"")]);

    let dataset = open_plain(tmp.path(), 10);
    assert!(matches!(
        dataset.get(0),
        Err(DatasetError::EmptyLabel { record_id: 1 })
    ));
}

#[test]
fn missing_store_fails_to_open() {
    let tmp = TempDir::new().unwrap();
    let result = OcrDataset::open(
        &tmp.path().join("does-not-exist"),
        DatasetView::Plain { cap: 1 },
        &DatasetConfig::default(),
    );
    assert!(matches!(result, Err(DatasetError::StoreOpen { .. })));
}

#[test]
fn unparsable_record_count_fails_construction() {
    let tmp = TempDir::new().unwrap();
    {
        let mut opts = rocksdb::Options::default();
        opts.create_if_missing(true);
        let db = rocksdb::DB::open(&opts, tmp.path()).unwrap();
        db.put(b"num-samples", b"not a number").unwrap();
    }

    let result = OcrDataset::open(
        tmp.path(),
        DatasetView::Plain { cap: 1 },
        &DatasetConfig::default(),
    );
    assert!(matches!(result, Err(DatasetError::RecordCount { .. })));
}

#[test]
fn normalized_samples_have_fixed_shape_and_range() {
    let tmp = TempDir::new().unwrap();
    write_store(tmp.path(), &[(png_bytes([255, 0, 128]), b"hi")]);

    let dataset = open_plain(tmp.path(), 1).with_transform(ResizeNormalize::new(100, 32));
    let (tensor, text) = dataset.get_normalized(0).unwrap();
    assert_eq!(text, "hi");
    assert_eq!(tensor.shape(), &[3, 32, 100]);
    assert!(tensor.iter().all(|&v| (-1.0..=1.0).contains(&v)));
}

#[test]
fn label_texts_reads_the_whole_store() {
    let tmp = TempDir::new().unwrap();
    write_store(
        tmp.path(),
        &[
            (png_bytes([1, 1, 1]), b"one"),
            (png_bytes([2, 2, 2]), b"two"),
            (png_bytes([3, 3, 3]), b"three"),
        ],
    );

    // A capped view still audits every stored label.
    let dataset = open_plain(tmp.path(), 1);
    let labels = dataset.label_texts().unwrap();
    assert_eq!(labels, vec!["one", "two", "three"]);

    let codec = LabelCodec::new("onetwhr").unwrap();
    let diffs = codec.audit(&labels).unwrap();
    // "three" collapses its double e.
    assert_eq!(diffs, vec![("three".to_string(), "thre".to_string())]);
}

#[test]
fn split_views_partition_the_store() {
    let tmp = TempDir::new().unwrap();
    let layout = KeyLayout {
        validation_reserved: 2,
        ..Default::default()
    };
    let config = DatasetConfig {
        layout,
        ..Default::default()
    };
    write_store(
        tmp.path(),
        &[
            (png_bytes([1, 0, 0]), b"val1"),
            (png_bytes([2, 0, 0]), b"val2"),
            (png_bytes([3, 0, 0]), b"train1"),
        ],
    );

    let train = OcrDataset::open(tmp.path(), DatasetView::Train, &config).unwrap();
    assert_eq!(train.len(), 1);
    assert_eq!(train.get(0).unwrap().text, "train1");

    let validation = OcrDataset::open(tmp.path(), DatasetView::Validation, &config).unwrap();
    assert_eq!(validation.len(), 2);
    assert_eq!(validation.get(1).unwrap().text, "val2");
}
