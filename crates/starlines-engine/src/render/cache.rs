/// Last value uploaded for one logical uniform (or size-dependent buffer).
///
/// One cache belongs to exactly one GPU destination and lives as long as it.
/// It starts empty, so the first value is always uploaded; afterwards an
/// upload happens only when the value differs (exact `PartialEq`) from the
/// previous one.
#[derive(Debug, Clone)]
pub struct UniformCache<T> {
    last: Option<T>,
}

impl<T> Default for UniformCache<T> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<T: PartialEq + Copy> UniformCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls `upload` with `value` unless it equals the cached value.
    ///
    /// Returns `true` if the upload ran.
    pub fn sync(&mut self, value: T, upload: impl FnOnce(&T)) -> bool {
        if self.last.as_ref() == Some(&value) {
            return false;
        }
        upload(&value);
        self.last = Some(value);
        true
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&T> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;

    #[test]
    fn first_value_is_uploaded() {
        let mut cache = UniformCache::new();
        let mut uploads = 0;
        assert!(cache.sync(0.0_f32, |_| uploads += 1));
        assert_eq!(uploads, 1);
    }

    #[test]
    fn repeated_value_is_skipped() {
        let mut cache = UniformCache::new();
        let mut uploads = 0;
        for _ in 0..100 {
            cache.sync(Mat4::IDENTITY, |_| uploads += 1);
        }
        assert_eq!(uploads, 1);
    }

    #[test]
    fn each_change_uploads_once() {
        let mut cache = UniformCache::new();
        let mut uploaded = Vec::new();
        for v in [0.1_f32, 0.1, 0.1, 0.5, 0.5, 0.1] {
            cache.sync(v, |v| uploaded.push(*v));
        }
        assert_eq!(uploaded, vec![0.1, 0.5, 0.1]);
        assert_eq!(cache.last(), Some(&0.1));
    }

    #[test]
    fn comparison_is_exact() {
        let mut cache = UniformCache::new();
        let mut uploads = 0;
        cache.sync(1.0_f32, |_| uploads += 1);
        cache.sync(1.0 + f32::EPSILON, |_| uploads += 1);
        assert_eq!(uploads, 2);
    }

    #[test]
    fn separate_caches_do_not_share_state() {
        let mut stars = UniformCache::new();
        let mut lines = UniformCache::new();
        let mut uploads = 0;
        stars.sync(Mat4::IDENTITY, |_| uploads += 1);
        lines.sync(Mat4::IDENTITY, |_| uploads += 1);
        assert_eq!(uploads, 2);
    }
}
