/// 단위 변환기에서 다루는 물리량 종류를 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityKind {
    Length,
    Area,
    Volume,
    Mass,
    MassFlow,
    Density,
    Time,
}

impl QuantityKind {
    /// 메뉴/콤보박스 순서대로 나열한다.
    pub const ALL: [QuantityKind; 7] = [
        QuantityKind::Length,
        QuantityKind::Area,
        QuantityKind::Volume,
        QuantityKind::Mass,
        QuantityKind::MassFlow,
        QuantityKind::Density,
        QuantityKind::Time,
    ];

    /// 변환기에서 보여줄 대표 단위 문자열 목록.
    pub fn unit_codes(&self) -> &'static [&'static str] {
        match self {
            QuantityKind::Length => &["mm", "cm", "m", "in"],
            QuantityKind::Area => &["mm2", "cm2", "m2", "in2"],
            QuantityKind::Volume => &["m3", "L", "mm3", "ft3"],
            QuantityKind::Mass => &["kg", "g", "t", "lb"],
            QuantityKind::MassFlow => &["kg/h", "kg/s", "t/h", "lb/h"],
            QuantityKind::Density => &["kg/m3", "g/L", "kg/L", "lb/ft3"],
            QuantityKind::Time => &["s", "min", "h"],
        }
    }
}
