//! Fragility ordering of box instances.

use crate::instance::BoxInstance;

/// Stable-sorts instances so strong boxes come first and fragile boxes last.
///
/// Boxes of equal fragility keep their input order, which decides which
/// SKU is consumed first when layers are homogeneous.
pub fn sort_by_fragility(instances: &mut [BoxInstance]) {
    // `sort_by_key` is stable.
    instances.sort_by_key(|b| b.fragility().rank());
}

/// Returns a fragility-ordered copy of the instances.
pub fn ordered_by_fragility(instances: &[BoxInstance]) -> Vec<BoxInstance> {
    let mut ordered = instances.to_vec();
    sort_by_fragility(&mut ordered);
    ordered
}
