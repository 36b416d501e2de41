//! Renderer-facing description of a reconstructed neuron.
//!
//! Nothing here depends on any particular host: a scene is plain data, and
//! hosts consume it through [`SceneHost`].

use crate::sample::CompartmentKind;
use crate::Point3;

/// The cell body, meant to be rendered as a sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Soma {
    pub position: Point3,
    pub radius: f64,
}

/// One control point along a branch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchPoint {
    pub position: Point3,
    /// Tube radius at this point.
    pub radius: f64,
}

/// A maximal unbranched run of samples, ready to become a tube or curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub points: Vec<BranchPoint>,
    /// Kind of the sample that opened the branch.
    pub kind: CompartmentKind,
}

impl Branch {
    /// Key for the material this branch should be shaded with.
    pub fn material_key(&self) -> &'static str {
        self.kind.material_key()
    }
}

/// Everything a host needs to draw one neuron.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneDescription {
    /// Present when the file carried a soma sample.
    pub soma: Option<Soma>,
    /// Branches in the order they were discovered in the file.
    pub branches: Vec<Branch>,
}

impl SceneDescription {
    /// Iterates the branches of one compartment kind.
    pub fn branches_of(&self, kind: CompartmentKind) -> impl Iterator<Item = &Branch> {
        self.branches.iter().filter(move |branch| branch.kind == kind)
    }
}

/// Receiver for finished scenes.
///
/// Implement this for whatever holds your geometry: a renderer, an
/// exporter, a test recorder. The importer calls [`add_neuron`] exactly
/// once per successfully imported file.
///
/// [`add_neuron`]: SceneHost::add_neuron
pub trait SceneHost {
    fn add_neuron(&mut self, name: &str, scene: &SceneDescription);
}

/// Host that drops every scene. Useful for validation runs.
pub struct NullHost;

impl SceneHost for NullHost {
    fn add_neuron(&mut self, _name: &str, _scene: &SceneDescription) {}
}

/// Default diffuse RGBA color for a material key.
///
/// Hosts are free to ignore this; it exists so simple viewers agree on a
/// palette (red soma, green axon, blue dendrite, yellow apical dendrite,
/// grey everything else).
pub fn default_diffuse(material_key: &str) -> [f32; 4] {
    match material_key {
        "soma" => [0.8, 0.2, 0.2, 1.0],
        "axon" => [0.2, 0.8, 0.2, 1.0],
        "dendrite" => [0.2, 0.2, 0.8, 1.0],
        "apical_dendrite" => [0.8, 0.8, 0.2, 1.0],
        _ => [0.8, 0.8, 0.8, 1.0],
    }
}
