//! Pallet assembly: stacks layers onto pallets under height and weight caps.

use crate::catalog::ProductCatalog;
use crate::fragility::ordered_by_fragility;
use crate::instance::BoxInstance;
use crate::layer::{assemble_layer, LayerPlan};
use crate::order::{expand_order, OrderLine};
use crate::pallet::PalletSpec;
use crate::result::{PackResult, Pallet};
use u_pallet_core::solver::{Config, ProgressCallback, ProgressInfo, Solver};
use u_pallet_core::{Error, Result};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Pallet assembly state.
enum State {
    /// No pallet open.
    AwaitingPallet,
    /// Layers are being added to the open pallet.
    FillingPallet(Pallet),
    /// The open pallet takes no further layers.
    PalletSealed(Pallet),
}

/// Pallet load planner.
pub struct Palletizer {
    config: Config,
    cancelled: Arc<AtomicBool>,
}

impl Palletizer {
    /// Creates a new palletizer with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates a palletizer with default configuration.
    pub fn default_config() -> Self {
        Self::new(Config::default())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Expands an order against the catalog and stacks the boxes.
    ///
    /// Skipped lines end up in [`PackResult::issues`] unless the configured
    /// issue policy is `Fail`.
    pub fn pack_order(
        &self,
        catalog: &ProductCatalog,
        lines: &[OrderLine],
        pallet: &PalletSpec,
    ) -> Result<PackResult> {
        self.pack_order_inner(catalog, lines, pallet, None)
    }

    /// Same as [`Palletizer::pack_order`] with progress reporting.
    pub fn pack_order_with_progress(
        &self,
        catalog: &ProductCatalog,
        lines: &[OrderLine],
        pallet: &PalletSpec,
        callback: ProgressCallback,
    ) -> Result<PackResult> {
        self.pack_order_inner(catalog, lines, pallet, Some(&callback))
    }

    fn pack_order_inner(
        &self,
        catalog: &ProductCatalog,
        lines: &[OrderLine],
        pallet: &PalletSpec,
        callback: Option<&ProgressCallback>,
    ) -> Result<PackResult> {
        let expansion = expand_order(catalog, lines, self.config.issue_policy)?;
        let mut result = self.run(&expansion.instances, pallet, callback)?;
        result.issues = expansion.issues;

        if !result.issues.is_empty() {
            log::warn!(
                "{} order line(s) skipped, {} known box(es) not packed",
                result.issues.len(),
                result.issues.iter().filter_map(|i| i.boxes).sum::<u64>()
            );
        }
        Ok(result)
    }

    /// Validates, orders and stacks a set of box instances.
    fn run(
        &self,
        instances: &[BoxInstance],
        pallet: &PalletSpec,
        callback: Option<&ProgressCallback>,
    ) -> Result<PackResult> {
        pallet.validate()?;
        self.cancelled.store(false, Ordering::Relaxed);

        let start = Instant::now();
        for instance in instances {
            check_box(instance, pallet)?;
        }

        let arena = ordered_by_fragility(instances);
        let pallets = self.stack(&arena, pallet, start, callback)?;

        let result = PackResult {
            pallets,
            issues: Vec::new(),
            total_boxes: arena.len(),
            computation_time_ms: start.elapsed().as_millis() as u64,
        };

        log::info!(
            "Stacked {} box(es) on {} pallet(s) in {}ms",
            result.placed_boxes(),
            result.pallet_count(),
            result.computation_time_ms
        );

        if let Some(callback) = callback {
            callback(
                ProgressInfo::new()
                    .with_phase("Complete")
                    .with_pallets(result.pallet_count())
                    .with_boxes(result.placed_boxes(), result.total_boxes)
                    .with_elapsed(result.computation_time_ms)
                    .finished(),
            );
        }

        Ok(result)
    }

    /// Layer-to-pallet loop over a fragility-ordered arena.
    fn stack(
        &self,
        arena: &[BoxInstance],
        spec: &PalletSpec,
        start: Instant,
        callback: Option<&ProgressCallback>,
    ) -> Result<Vec<Pallet>> {
        let footprint = spec.footprint();
        // Arena indices in packing order; stays ascending.
        let mut queue: Vec<usize> = (0..arena.len()).collect();
        let mut pallets: Vec<Pallet> = Vec::new();
        let mut packed = 0usize;
        let mut state = State::AwaitingPallet;

        loop {
            state = match state {
                State::AwaitingPallet => {
                    if queue.is_empty() {
                        break;
                    }
                    self.check_budget(start)?;
                    State::FillingPallet(Pallet::new(spec.tare_weight()))
                }

                State::FillingPallet(mut current) => {
                    let mut plan = assemble_layer(arena, &queue, footprint)?;

                    if plan.is_empty() {
                        if current.is_empty() {
                            return Err(unplaceable(&arena[queue[0]], spec));
                        }
                        State::PalletSealed(current)
                    } else {
                        let height = plan.height(arena);
                        let weight = plan.weight(arena);
                        let breaches = current.height() + height > spec.max_height()
                            || current.gross_weight() + weight > spec.max_gross_weight();

                        if breaches && !current.is_empty() {
                            State::PalletSealed(current)
                        } else {
                            if breaches {
                                plan = fit_on_empty_pallet(plan, arena, spec)?;
                            }
                            packed += plan.placed.len();
                            let layer = plan.to_layer(arena);
                            log::debug!(
                                "Pallet {}: layer {} ({:?}) with {} box(es), {:.1} cm, {:.1} kg",
                                pallets.len() + 1,
                                current.layers().len() + 1,
                                layer.kind,
                                layer.box_count(),
                                layer.height(),
                                layer.weight()
                            );
                            current.push_layer(layer);
                            queue = plan.not_placed;
                            State::FillingPallet(current)
                        }
                    }
                }

                State::PalletSealed(current) => {
                    log::debug!(
                        "Sealed pallet {}: {} layer(s), {:.1} cm, {:.1} kg",
                        pallets.len() + 1,
                        current.layers().len(),
                        current.height(),
                        current.gross_weight()
                    );
                    pallets.push(current);

                    if let Some(callback) = callback {
                        callback(
                            ProgressInfo::new()
                                .with_phase("Stacking")
                                .with_pallets(pallets.len())
                                .with_boxes(packed, arena.len())
                                .with_elapsed(start.elapsed().as_millis() as u64),
                        );
                    }

                    State::AwaitingPallet
                }
            };
        }

        Ok(pallets)
    }

    /// Cancellation and wall-clock check between pallets.
    fn check_budget(&self, start: Instant) -> Result<()> {
        if self.cancelled.load(Ordering::Relaxed) {
            return Err(Error::Cancelled);
        }
        if self.config.has_time_limit() {
            let elapsed = start.elapsed().as_millis() as u64;
            if elapsed > self.config.time_limit_ms {
                return Err(Error::Timeout(elapsed));
            }
        }
        Ok(())
    }
}

/// Rejects boxes that no pallet of this class can ever carry.
fn check_box(instance: &BoxInstance, spec: &PalletSpec) -> Result<()> {
    let footprint = instance.footprint();
    if !footprint.is_positive() || !(instance.stack_height() > 0.0) || !(instance.weight() >= 0.0)
    {
        return Err(Error::InvalidBoxSpec {
            sku: instance.sku().to_string(),
            variant: instance.variant().to_string(),
            reason: format!(
                "box {}x{}x{} cm, {} kg is not a valid box",
                footprint.length,
                footprint.width,
                instance.stack_height(),
                instance.weight()
            ),
        });
    }

    if exceeds_limits(instance, spec) {
        return Err(unplaceable(instance, spec));
    }
    Ok(())
}

fn exceeds_limits(instance: &BoxInstance, spec: &PalletSpec) -> bool {
    let fits_footprint = instance
        .footprint()
        .orientations(instance.is_rotatable())
        .iter()
        .any(|(_, oriented)| oriented.fits_in(&spec.footprint()));

    instance.stack_height() > spec.max_height()
        || spec.tare_weight() + instance.weight() > spec.max_gross_weight()
        || !fits_footprint
}

/// Describes why a box can never be placed.
fn unplaceable(instance: &BoxInstance, spec: &PalletSpec) -> Error {
    let footprint = instance.footprint();
    let reason = if instance.stack_height() > spec.max_height() {
        format!(
            "stack height {} cm exceeds the pallet height cap {} cm",
            instance.stack_height(),
            spec.max_height()
        )
    } else if spec.tare_weight() + instance.weight() > spec.max_gross_weight() {
        format!(
            "weight {} kg plus tare {} kg exceeds the gross weight cap {} kg",
            instance.weight(),
            spec.tare_weight(),
            spec.max_gross_weight()
        )
    } else {
        format!(
            "footprint {}x{} cm does not fit the {}x{} cm pallet{}",
            footprint.length,
            footprint.width,
            spec.length(),
            spec.width(),
            if instance.is_rotatable() {
                " in any orientation"
            } else {
                ""
            }
        )
    };

    Error::BoxExceedsPalletLimits {
        sku: instance.sku().to_string(),
        variant: instance.variant().to_string(),
        reason,
    }
}

/// Shrinks a candidate layer that is too heavy for an empty pallet.
///
/// Keeps the longest prefix of placed boxes within the weight cap and
/// returns the rest to the queue in queue order.
fn fit_on_empty_pallet(
    plan: LayerPlan,
    arena: &[BoxInstance],
    spec: &PalletSpec,
) -> Result<LayerPlan> {
    if let Some((idx, _)) = plan
        .placed
        .iter()
        .find(|(idx, _)| exceeds_limits(&arena[*idx], spec))
    {
        return Err(unplaceable(&arena[*idx], spec));
    }

    let mut weight = spec.tare_weight();
    let keep = plan
        .placed
        .iter()
        .take_while(|(idx, _)| {
            weight += arena[*idx].weight();
            weight <= spec.max_gross_weight()
        })
        .count();

    let LayerPlan {
        kind,
        mut placed,
        not_placed,
    } = plan;
    let mut returned: Vec<usize> = placed.split_off(keep).into_iter().map(|(i, _)| i).collect();
    returned.extend(not_placed);
    returned.sort_unstable();

    log::debug!(
        "Candidate layer too heavy for an empty pallet, keeping {} box(es)",
        placed.len()
    );

    Ok(LayerPlan {
        kind,
        placed,
        not_placed: returned,
    })
}

impl Solver for Palletizer {
    type Item = BoxInstance;
    type Container = PalletSpec;
    type Output = PackResult;

    fn solve(&self, items: &[BoxInstance], container: &PalletSpec) -> Result<PackResult> {
        self.run(items, container, None)
    }

    fn solve_with_progress(
        &self,
        items: &[BoxInstance],
        container: &PalletSpec,
        callback: ProgressCallback,
    ) -> Result<PackResult> {
        self.run(items, container, Some(&callback))
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BoxSpec;
    use crate::layer::LayerKind;
    use approx::assert_relative_eq;
    use std::sync::Mutex;
    use u_pallet_core::{Dimensions, Footprint, FragilityClass, IssuePolicy};

    fn boxes(sku: &str, n: usize, start: usize, dims: (f64, f64, f64), kg: f64) -> Vec<BoxInstance> {
        (start..start + n)
            .map(|id| {
                BoxInstance::new(id, sku, "box1", Footprint::new(dims.0, dims.1), dims.2)
                    .with_weight(kg)
            })
            .collect()
    }

    #[test]
    fn test_single_sku_two_layers() {
        let catalog = ProductCatalog::new().with_variant(
            "A1",
            "box1",
            BoxSpec::new(10, 5.0, Dimensions::new(40.0, 30.0, 20.0)),
        );
        let lines = vec![OrderLine::new("A1", "box1", 100)];

        let result = Palletizer::default_config()
            .pack_order(&catalog, &lines, &PalletSpec::euro())
            .unwrap();

        assert_eq!(result.pallet_count(), 1);
        let pallet = &result.pallets[0];
        assert_eq!(pallet.layers().len(), 2);
        assert_eq!(pallet.layers()[0].box_count(), 6);
        assert_relative_eq!(pallet.layers()[0].weight(), 30.0);
        assert_eq!(pallet.layers()[1].box_count(), 4);
        assert_relative_eq!(pallet.layers()[1].weight(), 20.0);
        assert_relative_eq!(pallet.height(), 40.0);
        assert_relative_eq!(pallet.gross_weight(), 75.0);
        assert_eq!(pallet.units(), 100);
    }

    #[test]
    fn test_height_cap_opens_new_pallet() {
        // 6 per layer, 50 cm per layer: 3 layers = 150 cm, a 4th would be 200 cm
        let items = boxes("A", 30, 0, (40.0, 30.0, 50.0), 1.0);
        let result = Palletizer::default_config()
            .solve(&items, &PalletSpec::euro())
            .unwrap();

        assert_eq!(result.pallet_count(), 2);
        assert_eq!(result.pallets[0].layers().len(), 3);
        assert_eq!(result.pallets[0].box_count(), 18);
        assert_eq!(result.pallets[1].box_count(), 12);
        for pallet in &result.pallets {
            assert!(pallet.height() <= 170.0);
        }
    }

    #[test]
    fn test_weight_cap_seals_pallet() {
        // 6 boxes of 40 kg = 240 kg per layer: 25 + 240 + 240 = 505, third layer breaches
        let items = boxes("A", 18, 0, (40.0, 30.0, 20.0), 40.0);
        let result = Palletizer::default_config()
            .solve(&items, &PalletSpec::euro())
            .unwrap();

        assert_eq!(result.pallet_count(), 2);
        assert_eq!(result.pallets[0].layers().len(), 2);
        assert_relative_eq!(result.pallets[0].gross_weight(), 505.0);
        assert_eq!(result.pallets[1].box_count(), 6);
        assert_eq!(result.placed_boxes(), 18);
    }

    #[test]
    fn test_overweight_layer_trimmed_on_empty_pallet() {
        // 6 boxes of 150 kg fit one layer by footprint but weigh 900 kg
        let items = boxes("A", 6, 0, (40.0, 30.0, 20.0), 150.0);
        let result = Palletizer::default_config()
            .solve(&items, &PalletSpec::euro())
            .unwrap();

        // 25 + 3 * 150 = 475 <= 600, a fourth box would be 625
        assert_eq!(result.pallet_count(), 2);
        assert_eq!(result.pallets[0].box_count(), 3);
        assert_eq!(result.pallets[1].box_count(), 3);
        assert!(result.pallets.iter().all(|p| !p.is_empty()));
        assert!(result.pallets.iter().all(|p| p.gross_weight() <= 600.0));
    }

    #[test]
    fn test_too_tall_box_fails_run() {
        let items = boxes("TALL", 1, 0, (40.0, 30.0, 200.0), 5.0);
        let err = Palletizer::default_config()
            .solve(&items, &PalletSpec::euro())
            .unwrap_err();

        match err {
            Error::BoxExceedsPalletLimits {
                sku,
                variant,
                reason,
            } => {
                assert_eq!(sku, "TALL");
                assert_eq!(variant, "box1");
                assert!(reason.contains("200"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_oversized_and_overweight_boxes_fail_run() {
        let wide = boxes("WIDE", 1, 0, (130.0, 90.0, 20.0), 5.0);
        assert!(matches!(
            Palletizer::default_config().solve(&wide, &PalletSpec::euro()),
            Err(Error::BoxExceedsPalletLimits { .. })
        ));

        let heavy = boxes("HEAVY", 1, 0, (40.0, 30.0, 20.0), 580.0);
        assert!(matches!(
            Palletizer::default_config().solve(&heavy, &PalletSpec::euro()),
            Err(Error::BoxExceedsPalletLimits { .. })
        ));

        // 70 x 110 only fits the 120 x 80 pallet rotated
        let fixed = boxes("LONG", 1, 0, (70.0, 110.0, 20.0), 5.0);
        assert!(Palletizer::default_config()
            .solve(&fixed, &PalletSpec::euro())
            .is_err());
        let rotatable: Vec<BoxInstance> =
            fixed.into_iter().map(|b| b.with_rotatable(true)).collect();
        assert!(Palletizer::default_config()
            .solve(&rotatable, &PalletSpec::euro())
            .is_ok());
    }

    #[test]
    fn test_empty_input_yields_no_pallets() {
        let result = Palletizer::default_config()
            .solve(&[], &PalletSpec::euro())
            .unwrap();
        assert!(result.pallets.is_empty());

        let result = Palletizer::default_config()
            .pack_order(&ProductCatalog::new(), &[], &PalletSpec::euro())
            .unwrap();
        assert!(result.pallets.is_empty());
        assert!(result.is_clean());
    }

    #[test]
    fn test_strong_boxes_stacked_below_fragile() {
        let mut items = boxes("GLASS", 6, 0, (40.0, 30.0, 20.0), 2.0);
        for b in items.iter_mut() {
            *b = b.clone().with_fragility(FragilityClass::Fragile);
        }
        items.extend(boxes("BRICK", 6, 6, (40.0, 30.0, 20.0), 10.0));

        let result = Palletizer::default_config()
            .solve(&items, &PalletSpec::euro())
            .unwrap();
        let layers = result.pallets[0].layers();
        assert_eq!(layers.len(), 2);
        assert!(layers[0].boxes.iter().all(|b| b.instance.sku() == "BRICK"));
        assert!(layers[1].boxes.iter().all(|b| b.instance.sku() == "GLASS"));
        assert_eq!(layers[0].kind, LayerKind::Mixed);
    }

    #[test]
    fn test_unknown_sku_skipped_or_failed() {
        let catalog = ProductCatalog::new().with_variant(
            "A1",
            "box1",
            BoxSpec::new(10, 5.0, Dimensions::new(40.0, 30.0, 20.0)),
        );
        let lines = vec![
            OrderLine::new("A1", "box1", 20),
            OrderLine::new("NOPE", "box1", 20),
        ];

        let result = Palletizer::default_config()
            .pack_order(&catalog, &lines, &PalletSpec::euro())
            .unwrap();
        assert_eq!(result.placed_boxes(), 2);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].error, Error::UnknownSku("NOPE".into()));

        let strict = Palletizer::new(Config::new().with_issue_policy(IssuePolicy::Fail));
        assert_eq!(
            strict.pack_order(&catalog, &lines, &PalletSpec::euro()),
            Err(Error::UnknownSku("NOPE".into()))
        );
    }

    #[test]
    fn test_invalid_pallet_rejected() {
        let items = boxes("A", 1, 0, (40.0, 30.0, 20.0), 5.0);
        let err = Palletizer::default_config()
            .solve(&items, &PalletSpec::new(0.0, 80.0))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPallet(_)));
    }

    #[test]
    fn test_degenerate_instance_rejected() {
        let items = boxes("FLAT", 2, 0, (40.0, 30.0, 0.0), 5.0);
        let err = Palletizer::default_config()
            .solve(&items, &PalletSpec::euro())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidBoxSpec { .. }));
    }

    #[test]
    fn test_cancel_before_solve_is_reset() {
        let items = boxes("A", 12, 0, (40.0, 30.0, 20.0), 5.0);
        let palletizer = Palletizer::default_config();
        palletizer.cancel();
        // The flag is reset at the start of each run
        assert!(palletizer.solve(&items, &PalletSpec::euro()).is_ok());
    }

    #[test]
    fn test_progress_reports_each_pallet() {
        let items = boxes("A", 30, 0, (40.0, 30.0, 50.0), 1.0);
        let seen: Arc<Mutex<Vec<ProgressInfo>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let result = Palletizer::default_config()
            .solve_with_progress(
                &items,
                &PalletSpec::euro(),
                Box::new(move |info| sink.lock().unwrap().push(info)),
            )
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), result.pallet_count() + 1);
        assert_eq!(seen[0].pallets_sealed, 1);
        assert_eq!(seen[0].boxes_packed, 18);
        let last = seen.last().unwrap();
        assert!(!last.running);
        assert_eq!(last.boxes_packed, 30);
        assert_eq!(last.total_boxes, 30);
    }

    #[test]
    fn test_repeatable() {
        let mut items = boxes("A", 7, 0, (60.0, 40.0, 25.0), 12.0);
        items.extend(boxes("B", 9, 7, (30.0, 20.0, 15.0), 3.0));
        items.extend(boxes("C", 5, 16, (50.0, 35.0, 30.0), 8.0));

        let palletizer = Palletizer::default_config();
        let first = palletizer.solve(&items, &PalletSpec::euro()).unwrap();
        let second = palletizer.solve(&items, &PalletSpec::euro()).unwrap();
        assert_eq!(first.pallets, second.pallets);
        assert_eq!(first.placed_boxes(), items.len());
    }
}
