use crate::algebra::FloatT;
use crate::model::Model;

use serde::{de::DeserializeOwned, Serialize};
use std::io::Write;
use std::{fs::File, io, io::Read};

impl<T> Model<T>
where
    T: FloatT + Serialize + DeserializeOwned,
{
    /// Write the model to a file as JSON.
    pub fn write_json(&self, file: &mut File) -> Result<(), io::Error> {
        let json = serde_json::to_string(&self)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Read a model from a JSON file produced by
    /// [`write_json`](Model::write_json).
    pub fn read_json(file: &mut File) -> Result<Self, io::Error> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let model = serde_json::from_str(&buffer)?;
        Ok(model)
    }
}

#[test]
fn test_json_io() {
    use std::io::{Seek, SeekFrom};

    let mut model = Model::<f64>::new();
    let [x, y] = model.add_variables(1.0);
    model.equality(x * y.sin(), 2.0);
    model.minimize(x.powi(2) + y.powi(2));

    // write the model to a file
    let mut file = tempfile::tempfile().unwrap();
    model.write_json(&mut file).unwrap();

    // read the model from the file
    file.seek(SeekFrom::Start(0)).unwrap();
    let model2 = Model::<f64>::read_json(&mut file).unwrap();
    assert_eq!(model, model2);
}
