//! 핵심 계산 로직을 라이브러리로 분리하여 CLI와 GUI가 같은 모델을 쓰도록 한다.

pub mod app;
pub mod config;
pub mod conversion;
pub mod flow;
pub mod i18n;
pub mod nozzle;
pub mod quantity;
pub mod ui_cli;
pub mod units;
