use serde::{Deserialize, Serialize};

/// 시간 단위. 내부 기준은 초이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
}

impl TimeUnit {
    /// 화면 표시용 기호.
    pub fn symbol(&self) -> &'static str {
        match self {
            TimeUnit::Second => "s",
            TimeUnit::Minute => "min",
            TimeUnit::Hour => "h",
        }
    }
}

fn to_second(value: f64, unit: TimeUnit) -> f64 {
    match unit {
        TimeUnit::Second => value,
        TimeUnit::Minute => value * 60.0,
        TimeUnit::Hour => value * 3600.0,
    }
}

fn from_second(value: f64, unit: TimeUnit) -> f64 {
    match unit {
        TimeUnit::Second => value,
        TimeUnit::Minute => value / 60.0,
        TimeUnit::Hour => value / 3600.0,
    }
}

/// 시간을 변환한다.
pub fn convert_time(value: f64, from: TimeUnit, to: TimeUnit) -> f64 {
    from_second(to_second(value, from), to)
}
