/// 단면 다각형의 꼭짓점. `radius`는 구멍 축에서의 거리(음수는 반대쪽), `depth`는 판 표면에서의 깊이.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfilePoint {
    pub radius: f64,
    pub depth: f64,
}

impl ProfilePoint {
    pub fn new(radius: f64, depth: f64) -> Self {
        Self { radius, depth }
    }
}

/// 원뿔 + 채널 구멍의 2D 단면.
///
/// 원뿔은 깊이 0의 넓은 입구에서 깊이 `Lc`의 목으로 좁아지는 사다리꼴이고,
/// 채널은 목에서 `Lc + Lch`까지 폭 `2·Rf`로 이어지는 직사각형이다.
/// 두 다각형은 깊이 `Lc`, 반경 `±Rf`의 변을 공유한다.
#[derive(Debug, Clone, PartialEq)]
pub struct NozzleGeometryProfile {
    pub cone: [ProfilePoint; 4],
    pub channel: [ProfilePoint; 4],
}

impl NozzleGeometryProfile {
    /// 입구 반경 `rc`, 최종 반경 `rf`, 원뿔 길이 `lc`, 채널 길이 `lch`로 단면을 만든다.
    pub fn new(rc: f64, rf: f64, lc: f64, lch: f64) -> Self {
        let bottom = lc + lch;
        Self {
            cone: [
                ProfilePoint::new(-rc, 0.0),
                ProfilePoint::new(-rf, lc),
                ProfilePoint::new(rf, lc),
                ProfilePoint::new(rc, 0.0),
            ],
            channel: [
                ProfilePoint::new(-rf, lc),
                ProfilePoint::new(-rf, bottom),
                ProfilePoint::new(rf, bottom),
                ProfilePoint::new(rf, lc),
            ],
        }
    }

    /// 원뿔 목(깊이 `Lc`)의 반경.
    pub fn throat_radius(&self) -> f64 {
        self.cone[2].radius
    }

    /// 채널 바닥까지의 깊이.
    pub fn depth(&self) -> f64 {
        self.channel[1].depth
    }

    /// 원뿔과 채널 중 큰 쪽의 반경. 그림 범위를 잡을 때 쓴다.
    pub fn max_radius(&self) -> f64 {
        self.cone
            .iter()
            .chain(self.channel.iter())
            .map(|p| p.radius.abs())
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cone_and_channel_share_throat_edge() {
        let p = NozzleGeometryProfile::new(10.0, 5.0, 10.0, 10.0);
        assert_eq!(p.cone[1], p.channel[0]);
        assert_eq!(p.cone[2], p.channel[3]);
        assert_eq!(p.throat_radius(), 5.0);
        assert_eq!(p.depth(), 20.0);
        assert_eq!(p.max_radius(), 10.0);
    }
}
