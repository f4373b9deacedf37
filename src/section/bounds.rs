// ============================================
// Bounding Box - AABB секции
// ============================================
// Пустой бокс (is_valid = false) не равен боксу нулевого размера в начале координат.

use ultraviolet::Vec3;

/// Axis-aligned bounding box по позициям вершин
#[derive(Clone, Copy, Debug)]
pub struct BoundingBox {
    min: Vec3,
    max: Vec3,
    is_valid: bool,
}

impl BoundingBox {
    /// Каноничный пустой бокс: углы в нуле, точек нет
    pub fn empty() -> Self {
        Self {
            min: Vec3::zero(),
            max: Vec3::zero(),
            is_valid: false,
        }
    }

    /// Бокс из готовых углов (берётся как есть, без проверки min <= max)
    pub fn from_corners(min: Vec3, max: Vec3) -> Self {
        Self { min, max, is_valid: true }
    }

    /// Расширить бокс до точки
    pub fn add_point(&mut self, point: Vec3) {
        if self.is_valid {
            self.min = self.min.min_by_component(point);
            self.max = self.max.max_by_component(point);
        } else {
            self.min = point;
            self.max = point;
            self.is_valid = true;
        }
    }

    /// Объединение с другим боксом (пустые игнорируются)
    pub fn union(&mut self, other: &BoundingBox) {
        if !other.is_valid {
            return;
        }
        self.add_point(other.min);
        self.add_point(other.max);
    }

    pub fn contains(&self, point: Vec3) -> bool {
        self.is_valid
            && point.x >= self.min.x && point.x <= self.max.x
            && point.y >= self.min.y && point.y <= self.max.y
            && point.z >= self.min.z && point.z <= self.max.z
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for BoundingBox {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_valid, other.is_valid) {
            (false, false) => true,
            (true, true) => self.min == other.min && self.max == other.max,
            _ => false,
        }
    }
}
