use serde::Serialize;

use crate::models::property::Property;

#[derive(Debug, Serialize)]
pub struct PropertySavedOut {
    pub message: String,
    pub property: Property,
}
