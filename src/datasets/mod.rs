pub mod brazil_cities;

use crate::agg::extract::RowExtractor;
use crate::error::{Error, Result};

pub fn get_dataset(name: &str) -> Result<RowExtractor> {
    match name {
        "brazil-cities" => Ok(brazil_cities::extractor()),
        _ => Err(Error::UnknownDataset(name.to_string())),
    }
}
