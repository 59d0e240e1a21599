#![cfg(feature = "serde")]

use nlmodel::fixtures::{default_model, unary_model};
use nlmodel::model::Model;
use std::io::{Seek, SeekFrom};

#[test]
fn test_fixture_json_roundtrip() {
    for model in [default_model(), unary_model()] {
        let mut file = tempfile::tempfile().unwrap();
        model.write_json(&mut file).unwrap();

        file.seek(SeekFrom::Start(0)).unwrap();
        let reread = Model::<f64>::read_json(&mut file).unwrap();

        // JSON preserves the expression trees exactly
        assert_eq!(model, reread);
    }
}

#[test]
fn test_json_rejects_garbage() {
    use std::io::Write;

    let mut file = tempfile::tempfile().unwrap();
    file.write_all(b"not a model").unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();
    assert!(Model::<f64>::read_json(&mut file).is_err());
}
