//! 회전 테이블
//!
//! 정이면체군(order k)의 모든 회전 `i·2π/k`에 대한 sin/cos 쌍을 한 번만 계산해
//! 샘플당 삼각함수 호출 없이 섹터 접기를 수행한다.

use std::f32::consts::PI;

use crate::error::{KaleidoscopeError, Result};
use crate::ops::geometry::MAX_ORDER;

const CAPACITY: usize = 2 * MAX_ORDER as usize;

/// `(sin, cos)` of every multiple of the dihedral step angle `2π/k`.
#[repr(C, align(64))]
#[derive(Clone)]
pub struct RotationTable {
    entries: [[f32; 2]; CAPACITY],
    len: usize,
    order: i32,
}

impl RotationTable {
    /// Builds `2k` entries, `entries[i] = (sin(i·2π/k), cos(i·2π/k))`.
    pub fn new(order: i32) -> Result<Self> {
        if !(1..=MAX_ORDER).contains(&order) {
            return Err(KaleidoscopeError::InvalidParameter {
                name: "k",
                value: order as i64,
                reason: "rotation table needs 1 <= k <= 100",
            });
        }
        let step = 2.0 * PI / order as f32;
        let len = 2 * order as usize;
        let mut entries = [[0.0; 2]; CAPACITY];
        for (i, entry) in entries.iter_mut().take(len).enumerate() {
            let angle = i as f32 * step;
            *entry = [angle.sin(), angle.cos()];
        }
        Ok(Self { entries, len, order })
    }

    pub fn order(&self) -> i32 {
        self.order
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Sine and cosine for a rotation by `step · 2π/k`; any integer step is accepted.
    #[inline(always)]
    pub fn lookup(&self, step: i32) -> (f32, f32) {
        let [sine, cosine] = self.entries[step.rem_euclid(self.len as i32) as usize];
        (sine, cosine)
    }

    /// Steps that are multiples of k rotate by a full turn.
    #[inline(always)]
    pub fn is_identity(&self, step: i32) -> bool {
        step.rem_euclid(self.order) == 0
    }

    #[cfg(test)]
    pub(crate) const fn size() -> usize {
        std::mem::size_of::<Self>()
    }
}

impl std::fmt::Debug for RotationTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotationTable")
            .field("order", &self.order)
            .field("len", &self.len)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_테이블_크기() {
        let table = RotationTable::new(5).unwrap();
        assert_eq!(table.len(), 10);
        assert_eq!(RotationTable::size() % 64, 0);
    }

    #[test]
    fn test_회전_조회() {
        let table = RotationTable::new(4).unwrap();

        let (s, c) = table.lookup(0);
        assert_relative_eq!(s, 0.0);
        assert_relative_eq!(c, 1.0);

        // 90도
        let (s, c) = table.lookup(1);
        assert_relative_eq!(s, 1.0, epsilon = 1e-6);
        assert_relative_eq!(c, 0.0, epsilon = 1e-6);

        // 음수 및 범위 밖 인덱스는 순환
        let (s, c) = table.lookup(-1);
        assert_relative_eq!(s, -1.0, epsilon = 1e-6);
        assert_relative_eq!(c, 0.0, epsilon = 1e-6);
        assert_eq!(table.lookup(9), table.lookup(1));
    }

    #[test]
    fn test_항등_회전() {
        let table = RotationTable::new(6).unwrap();
        assert!(table.is_identity(0));
        assert!(table.is_identity(6));
        assert!(table.is_identity(-12));
        assert!(!table.is_identity(5));
    }

    #[test]
    fn test_차수_범위() {
        assert!(RotationTable::new(0).is_err());
        assert!(RotationTable::new(101).is_err());
        assert_eq!(RotationTable::new(100).unwrap().len(), 200);
    }
}
