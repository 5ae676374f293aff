use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize, SmartDefault)]
pub struct Raster {
    #[default(1280)]
    pub width: u32,
    #[default(720)]
    pub height: u32,
}
