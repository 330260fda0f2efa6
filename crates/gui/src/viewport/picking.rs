use glam::Vec3;

/// A ray in world space
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box containing nothing; extending it with a point yields that point
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::MAX),
            max: Vec3::splat(f32::MIN),
        }
    }

    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut aabb = Self::empty();
        for p in points {
            aabb.extend(p);
        }
        aabb
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn extend(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::ZERO;
        }
        self.max - self.min
    }

    /// Largest of width, height and depth (0 for an empty box)
    pub fn max_dimension(&self) -> f32 {
        self.size().max_element()
    }
}

/// Ray-AABB intersection using the slab method.
/// Returns the distance along the ray to the nearest hit, or None.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let inv_dir = Vec3::new(
        1.0 / ray.direction.x,
        1.0 / ray.direction.y,
        1.0 / ray.direction.z,
    );

    let t1 = (aabb.min.x - ray.origin.x) * inv_dir.x;
    let t2 = (aabb.max.x - ray.origin.x) * inv_dir.x;
    let t3 = (aabb.min.y - ray.origin.y) * inv_dir.y;
    let t4 = (aabb.max.y - ray.origin.y) * inv_dir.y;
    let t5 = (aabb.min.z - ray.origin.z) * inv_dir.z;
    let t6 = (aabb.max.z - ray.origin.z) * inv_dir.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Pick the nearest named mesh whose AABB is intersected by the ray.
pub fn pick_nearest(ray: &Ray, aabbs: &[(String, Aabb)]) -> Option<String> {
    let mut best: Option<(&str, f32)> = None;

    for (name, aabb) in aabbs {
        if let Some(dist) = ray_aabb(ray, aabb) {
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((name, dist));
            }
        }
    }

    best.map(|(name, _)| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box_at(center: Vec3) -> Aabb {
        Aabb {
            min: center - Vec3::splat(0.5),
            max: center + Vec3::splat(0.5),
        }
    }

    #[test]
    fn test_empty_box() {
        let aabb = Aabb::empty();
        assert!(aabb.is_empty());
        assert_eq!(aabb.max_dimension(), 0.0);
    }

    #[test]
    fn test_single_point_has_zero_size() {
        let aabb = Aabb::from_points([Vec3::new(1.0, 2.0, 3.0)]);
        assert!(!aabb.is_empty());
        assert_eq!(aabb.max_dimension(), 0.0);
        assert_eq!(aabb.center(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_max_dimension() {
        let aabb = Aabb::from_points([Vec3::ZERO, Vec3::new(4.0, 1.5, 2.0)]);
        assert_eq!(aabb.max_dimension(), 4.0);
        assert_eq!(aabb.center(), Vec3::new(2.0, 0.75, 1.0));
    }

    #[test]
    fn test_pick_nearest_prefers_closer_box() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 10.0),
            direction: Vec3::NEG_Z,
        };
        let boxes = vec![
            ("far".to_string(), unit_box_at(Vec3::new(0.0, 0.0, -3.0))),
            ("near".to_string(), unit_box_at(Vec3::new(0.0, 0.0, 2.0))),
            ("off_axis".to_string(), unit_box_at(Vec3::new(5.0, 0.0, 5.0))),
        ];
        assert_eq!(pick_nearest(&ray, &boxes).as_deref(), Some("near"));
    }

    #[test]
    fn test_pick_nothing() {
        let ray = Ray {
            origin: Vec3::new(0.0, 10.0, 0.0),
            direction: Vec3::Y,
        };
        let boxes = vec![("a".to_string(), unit_box_at(Vec3::ZERO))];
        assert!(pick_nearest(&ray, &boxes).is_none());
    }
}
