//! 단위 정의 및 변환 모듈 모음.

pub mod area;
pub mod density;
pub mod length;
pub mod mass;
pub mod mass_flow;
pub mod time;
pub mod volume;

pub use area::{convert_area, AreaUnit};
pub use density::{convert_density, DensityUnit};
pub use length::{convert_length, LengthUnit};
pub use mass::{convert_mass, MassUnit};
pub use mass_flow::{convert_mass_flow, MassFlowUnit};
pub use time::{convert_time, TimeUnit};
pub use volume::{convert_volume, VolumeUnit};
