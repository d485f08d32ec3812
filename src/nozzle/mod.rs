//! 원뿔 + 원통 채널로 이루어진 노즐형 타공의 개구면적, 2D 단면, 3D 회전체 계산 모듈.

pub mod geometry;
pub mod open_area;
pub mod profile;
pub mod solid;

pub use geometry::{
    compute_nozzle_geometry, compute_nozzle_geometry_with, NozzleError, NozzleGeometry,
    NozzleInputs,
};
pub use open_area::NozzleResult;
pub use profile::{NozzleGeometryProfile, ProfilePoint};
pub use solid::{NozzleSolid, SolidResolution, SurfaceGrid};
