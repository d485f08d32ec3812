//! 연속 투입(건조 고형분 + 액체) 용기의 물질수지/충전율/체류시간 계산 모듈.
//! 질량 기준(모드 A)과 밀도·체적 기준(모드 B) 두 입력 형태를 하나의 입력 타입으로 다룬다.

pub mod material_balance;
pub mod overrides;
pub mod retention;

pub use material_balance::{compute_flow_balance, FlowError, FlowInputs, FlowMode, FlowResult};
pub use overrides::FlowOverrides;
pub use retention::{
    bulk_density_kg_per_m3, fill_degree_pct, retention_time_s, wet_throughput_kg_per_h,
};
