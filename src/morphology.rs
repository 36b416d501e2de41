//! Single-pass reconstruction of renderable branches from a sample table.
//!
//! The walk visits samples in file order and keeps a cursor holding the id
//! of the last sample that produced geometry. A sample whose parent equals
//! the cursor extends the open branch; any other parent closes it and opens
//! a new branch, anchored at the parent's position when the parent id
//! resolves. Soma and reserved samples are skipped without moving the
//! cursor, so a soma line in the middle of an axon run does not split the
//! axon in two.
//!
//! Branches that sprout from the soma get a taper: the soma-side anchor
//! radius is divided by `radius_scale` while the first branch point is
//! multiplied by it, which keeps thin processes from vanishing into a
//! large cell body.

use log::warn;

use crate::sample::{CompartmentKind, Sample, SampleTable};
use crate::scene::{Branch, BranchPoint, SceneDescription, Soma};

/// Knobs for one import.
#[derive(Debug, Clone, Copy)]
pub struct ImportOptions {
    /// Divisor applied to every coordinate and radius. SWC files are in
    /// micrometers; the default brings them down to scene units.
    pub scale: f64,
    /// Shapes the taper where a branch leaves the soma: the anchor radius
    /// is divided by this, the first branch point's radius multiplied by it.
    pub radius_scale: f64,
    /// Floor applied to every radius after scaling.
    pub min_radius: f64,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            scale: 1000.0,
            radius_scale: 1.0,
            min_radius: 0.0,
        }
    }
}

/// Turns a [`SampleTable`] into a [`SceneDescription`].
pub struct MorphologyBuilder<'a> {
    table: &'a SampleTable,
    options: ImportOptions,
}

impl<'a> MorphologyBuilder<'a> {
    pub fn new(table: &'a SampleTable, options: ImportOptions) -> Self {
        Self { table, options }
    }

    /// Runs the walk described in the module docs.
    pub fn build(&self) -> SceneDescription {
        let soma = self.find_soma();

        let mut branches = Vec::new();
        let mut open: Option<Branch> = None;
        // Id of the last sample that produced geometry.
        let mut last: Option<i64> = None;

        for sample in self.table.samples() {
            if matches!(
                sample.kind,
                CompartmentKind::Soma | CompartmentKind::Reserved
            ) {
                continue;
            }

            match open.as_mut() {
                Some(branch) if last == Some(sample.parent) => {
                    branch.points.push(self.branch_point(sample));
                }
                _ => {
                    branches.extend(open.take());
                    open = Some(self.open_branch(sample));
                }
            }
            last = Some(sample.id);
        }
        branches.extend(open);

        SceneDescription { soma, branches }
    }

    fn find_soma(&self) -> Option<Soma> {
        let scale = self.options.scale;
        self.table
            .samples()
            .find(|sample| sample.kind == CompartmentKind::Soma)
            .map(|sample| Soma {
                position: sample.position / scale,
                radius: self.floored(sample.radius / scale),
            })
    }

    /// Starts a branch at `sample`, anchored at its parent when the parent
    /// id resolves.
    fn open_branch(&self, sample: &Sample) -> Branch {
        let scale = self.options.scale;
        let mut points = Vec::new();
        let mut at_soma = false;

        if !sample.is_root() {
            if let Some(anchor) = self.table.get(sample.parent) {
                at_soma = anchor.kind == CompartmentKind::Soma;
                let mut radius = anchor.radius / scale;
                if at_soma {
                    // Soma-side half of the taper.
                    radius /= self.options.radius_scale;
                }
                points.push(BranchPoint {
                    position: anchor.position / scale,
                    radius: self.floored(radius),
                });
            } else {
                warn!(
                    "sample {} names missing parent {}; starting the branch at the sample itself",
                    sample.id, sample.parent
                );
            }
        }

        let mut radius = sample.radius / scale;
        if at_soma {
            // Branch-side half of the taper.
            radius *= self.options.radius_scale;
        }
        points.push(BranchPoint {
            position: sample.position / scale,
            radius: self.floored(radius),
        });

        Branch {
            points,
            kind: sample.kind,
        }
    }

    fn branch_point(&self, sample: &Sample) -> BranchPoint {
        let scale = self.options.scale;
        BranchPoint {
            position: sample.position / scale,
            radius: self.floored(sample.radius / scale),
        }
    }

    fn floored(&self, radius: f64) -> f64 {
        radius.max(self.options.min_radius)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::parser::parse;
    use crate::Point3;

    fn build(text: &str, options: ImportOptions) -> SceneDescription {
        let table = parse(text).unwrap();
        MorphologyBuilder::new(&table, options).build()
    }

    fn unit() -> ImportOptions {
        ImportOptions {
            scale: 1.0,
            ..ImportOptions::default()
        }
    }

    /// Flattens a branch for compact comparisons: (x, y, z, radius).
    fn pts(branch: &Branch) -> Vec<(f64, f64, f64, f64)> {
        branch
            .points
            .iter()
            .map(|p| (p.position.x, p.position.y, p.position.z, p.radius))
            .collect()
    }

    const FORKED: &str = "\
1 1 0 0 0 5 -1
2 2 1 0 0 1 1
3 2 2 0 0 1 2
4 2 5 5 0 1 1
";

    #[test]
    fn rebuilds_a_forked_axon() {
        let scene = build(FORKED, unit());

        let soma = scene.soma.unwrap();
        assert_eq!(soma.position, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(soma.radius, 5.0);

        assert_eq!(scene.branches.len(), 2);
        let run = &scene.branches[0];
        assert_eq!(run.kind, CompartmentKind::Axon);
        assert_eq!(run.material_key(), "axon");
        assert_eq!(
            pts(run),
            [
                (0.0, 0.0, 0.0, 5.0),
                (1.0, 0.0, 0.0, 1.0),
                (2.0, 0.0, 0.0, 1.0),
            ]
        );

        let fork = &scene.branches[1];
        assert_eq!(pts(fork), [(0.0, 0.0, 0.0, 5.0), (5.0, 5.0, 0.0, 1.0)]);
    }

    #[test]
    fn scale_divides_positions_and_radii() {
        let scene = build(FORKED, ImportOptions::default());

        let soma = scene.soma.unwrap();
        assert_relative_eq!(soma.radius, 0.005);

        let second = scene.branches[0].points[1];
        assert_relative_eq!(second.position, Point3::new(0.001, 0.0, 0.0));
        assert_relative_eq!(second.radius, 0.001);
    }

    #[test]
    fn scaled_run_matches_the_unit_run_divided_by_scale() {
        let unit_scene = build(FORKED, unit());
        let scaled = build(FORKED, ImportOptions::default());

        assert_eq!(unit_scene.branches.len(), scaled.branches.len());
        for (a, b) in unit_scene.branches.iter().zip(&scaled.branches) {
            assert_eq!(a.points.len(), b.points.len());
            for (p, q) in a.points.iter().zip(&b.points) {
                assert_relative_eq!(p.position / 1000.0, q.position);
                assert_relative_eq!(p.radius / 1000.0, q.radius);
            }
        }
    }

    #[test]
    fn radius_scale_tapers_branches_leaving_the_soma() {
        let text = "\
1 1 0 0 0 5 -1
2 2 1 0 0 1 1
3 2 2 0 0 1 2
4 3 1 5 0 1 2
";
        let options = ImportOptions {
            scale: 1.0,
            radius_scale: 10.0,
            ..ImportOptions::default()
        };
        let scene = build(text, options);
        assert_eq!(scene.branches.len(), 2);

        // Soma-anchored branch: anchor shrunk, first point widened.
        let tapered = pts(&scene.branches[0]);
        assert_eq!(tapered[0].3, 0.5);
        assert_eq!(tapered[1].3, 10.0);
        assert_eq!(tapered[2].3, 1.0);

        // Anchored at an axon sample: no taper on either side.
        let plain = pts(&scene.branches[1]);
        assert_eq!(plain[0].3, 1.0);
        assert_eq!(plain[1].3, 1.0);
    }

    #[test]
    fn min_radius_floors_every_emitted_radius() {
        let text = "\
1 1 0 0 0 0.5 -1
2 2 1 0 0 1 1
3 2 2 0 0 4 2
";
        let options = ImportOptions {
            scale: 1.0,
            min_radius: 2.0,
            ..ImportOptions::default()
        };
        let scene = build(text, options);

        assert_eq!(scene.soma.unwrap().radius, 2.0);
        let radii: Vec<f64> = scene.branches[0].points.iter().map(|p| p.radius).collect();
        assert_eq!(radii, [2.0, 2.0, 4.0]);
    }

    #[test]
    fn file_without_soma_still_yields_branches() {
        let scene = build("1 2 0 0 0 1 -1\n2 2 1 0 0 1 1\n", unit());
        assert!(scene.soma.is_none());
        assert_eq!(scene.branches.len(), 1);
        assert_eq!(
            pts(&scene.branches[0]),
            [(0.0, 0.0, 0.0, 1.0), (1.0, 0.0, 0.0, 1.0)]
        );
    }

    #[test]
    fn soma_only_file_has_no_branches() {
        let scene = build("1 1 0 0 0 5 -1\n", unit());
        assert!(scene.soma.is_some());
        assert!(scene.branches.is_empty());
    }

    #[test]
    fn forking_from_an_earlier_sample_splits_the_branch() {
        let text = "\
1 2 0 0 0 1 -1
2 2 1 0 0 1 1
3 2 2 0 0 1 2
4 3 1 5 0 1 2
";
        let scene = build(text, unit());
        assert_eq!(scene.branches.len(), 2);
        assert_eq!(scene.branches[0].points.len(), 3);

        let fork = &scene.branches[1];
        assert_eq!(fork.kind, CompartmentKind::Dendrite);
        assert_eq!(pts(fork), [(1.0, 0.0, 0.0, 1.0), (1.0, 5.0, 0.0, 1.0)]);
    }

    #[test]
    fn soma_sample_in_the_middle_does_not_split_a_run() {
        let text = "\
1 2 0 0 0 1 -1
2 2 1 0 0 1 1
3 1 9 9 9 5 -1
4 2 2 0 0 1 2
";
        let scene = build(text, unit());

        assert_eq!(scene.soma.unwrap().position, Point3::new(9.0, 9.0, 9.0));
        // Sample 4 still continues the run opened by samples 1 and 2.
        assert_eq!(scene.branches.len(), 1);
        assert_eq!(scene.branches[0].points.len(), 3);
    }

    #[test]
    fn reserved_samples_leave_no_geometry() {
        let text = "\
1 2 0 0 0 1 -1
2 2 1 0 0 1 1
3 10 4 4 4 1 2
4 2 2 0 0 1 2
";
        let scene = build(text, unit());
        assert_eq!(scene.branches.len(), 1);
        assert_eq!(
            pts(&scene.branches[0]),
            [
                (0.0, 0.0, 0.0, 1.0),
                (1.0, 0.0, 0.0, 1.0),
                (2.0, 0.0, 0.0, 1.0),
            ]
        );
    }

    #[test]
    fn reserved_sample_can_still_anchor_a_branch() {
        let scene = build("1 10 0 0 0 3 -1\n2 2 1 0 0 1 1\n", unit());
        assert!(scene.soma.is_none());
        assert_eq!(scene.branches.len(), 1);
        assert_eq!(
            pts(&scene.branches[0]),
            [(0.0, 0.0, 0.0, 3.0), (1.0, 0.0, 0.0, 1.0)]
        );
    }

    #[test]
    fn missing_parent_starts_the_branch_at_the_sample() {
        let text = "\
1 2 0 0 0 1 -1
2 2 1 0 0 1 1
3 2 5 0 0 1 99
";
        let scene = build(text, unit());
        assert_eq!(scene.branches.len(), 2);
        assert_eq!(pts(&scene.branches[1]), [(5.0, 0.0, 0.0, 1.0)]);
    }

    #[test]
    fn self_parent_does_not_loop() {
        let scene = build("1 2 0 0 0 1 1\n", unit());
        assert_eq!(scene.branches.len(), 1);
        let run = pts(&scene.branches[0]);
        assert_eq!(run.len(), 2);
        assert_eq!(run[0], run[1]);
    }

    #[test]
    fn redefined_sample_drives_the_geometry() {
        let text = "\
1 1 0 0 0 5 -1
2 2 1 0 0 1 1
2 2 3 0 0 1 1
";
        let scene = build(text, unit());
        assert_eq!(scene.branches.len(), 1);
        assert_eq!(
            pts(&scene.branches[0]),
            [(0.0, 0.0, 0.0, 5.0), (3.0, 0.0, 0.0, 1.0)]
        );
    }

    #[test]
    fn unknown_type_codes_fall_back_to_the_default_material() {
        let scene = build("1 7 0 0 0 1 -1\n", unit());
        let branch = &scene.branches[0];
        assert_eq!(branch.kind, CompartmentKind::Custom(7));
        assert_eq!(branch.material_key(), "default");
    }
}
