use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// 회전체 격자의 샘플 수. 렌더링 해상도일 뿐 계산 정확도와는 무관하다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolidResolution {
    /// 깊이 방향 샘플 수
    pub depth_samples: usize,
    /// 회전각 방향 샘플 수
    pub angle_samples: usize,
}

impl Default for SolidResolution {
    fn default() -> Self {
        Self {
            depth_samples: 30,
            angle_samples: 30,
        }
    }
}

/// `start`에서 `end`까지 `n`개를 균등 분할한다. 양 끝점을 포함한다.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = end;
            out
        }
    }
}

/// (회전각 × 깊이) 직교 격자 위의 3D 점 집합. `points[i][j]`는 i번째 각도, j번째 깊이.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceGrid {
    pub points: Vec<Vec<[f64; 3]>>,
}

impl SurfaceGrid {
    /// 깊이별 반경을 회전시켜 격자를 만든다.
    fn revolve(depths: &[f64], radii: &[f64], angles: &[f64]) -> Self {
        let points = angles
            .iter()
            .map(|theta| {
                let (sin, cos) = theta.sin_cos();
                depths
                    .iter()
                    .zip(radii)
                    .map(|(z, r)| [r * cos, r * sin, *z])
                    .collect()
            })
            .collect();
        Self { points }
    }

    /// 각도 방향 행 수.
    pub fn rows(&self) -> usize {
        self.points.len()
    }

    /// 깊이 방향 열 수.
    pub fn cols(&self) -> usize {
        self.points.first().map_or(0, Vec::len)
    }

    pub fn point(&self, row: usize, col: usize) -> [f64; 3] {
        self.points[row][col]
    }

    /// 행 우선으로 평탄화한 정점 목록.
    pub fn vertices(&self) -> Vec<[f64; 3]> {
        self.points.iter().flatten().copied().collect()
    }

    /// `vertices()` 인덱스 기준 삼각형 목록. 격자 한 칸당 두 개.
    pub fn triangle_indices(&self) -> Vec<[usize; 3]> {
        let (rows, cols) = (self.rows(), self.cols());
        if rows < 2 || cols < 2 {
            return Vec::new();
        }
        let mut tris = Vec::with_capacity((rows - 1) * (cols - 1) * 2);
        for i in 0..rows - 1 {
            for j in 0..cols - 1 {
                let a = i * cols + j;
                let b = a + 1;
                let c = a + cols;
                let d = c + 1;
                tris.push([a, c, b]);
                tris.push([b, c, d]);
            }
        }
        tris
    }
}

/// 원뿔 외피와 채널 외피 두 개의 독립 격자. 하나의 메쉬로 합치지 않는다.
#[derive(Debug, Clone, PartialEq)]
pub struct NozzleSolid {
    pub cone: SurfaceGrid,
    pub channel: SurfaceGrid,
}

impl NozzleSolid {
    /// 원뿔은 `[0, lc]`에서 반경 `rc → rf`, 채널은 `[lc, plate_thickness]`에서 반경 `rf`.
    pub fn new(rc: f64, rf: f64, lc: f64, plate_thickness: f64, res: SolidResolution) -> Self {
        let angles = linspace(0.0, TAU, res.angle_samples);

        let cone_depths = linspace(0.0, lc, res.depth_samples);
        let cone_radii = linspace(rc, rf, res.depth_samples);

        let channel_depths = linspace(lc, plate_thickness, res.depth_samples);
        let channel_radii = vec![rf; res.depth_samples];

        Self {
            cone: SurfaceGrid::revolve(&cone_depths, &cone_radii, &angles),
            channel: SurfaceGrid::revolve(&channel_depths, &channel_radii, &angles),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_hits_both_ends() {
        let v = linspace(0.0, 1.0, 5);
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn grid_triangulation_counts() {
        let solid = NozzleSolid::new(10.0, 5.0, 10.0, 20.0, SolidResolution {
            depth_samples: 4,
            angle_samples: 3,
        });
        assert_eq!(solid.cone.rows(), 3);
        assert_eq!(solid.cone.cols(), 4);
        assert_eq!(solid.cone.vertices().len(), 12);
        assert_eq!(solid.cone.triangle_indices().len(), 2 * 3 * 2);
        let max_index = solid
            .channel
            .triangle_indices()
            .iter()
            .flatten()
            .copied()
            .max()
            .unwrap();
        assert_eq!(max_index, 11);
    }
}
