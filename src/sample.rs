//! Point samples and the ordered table the parser produces.

use linked_hash_map::LinkedHashMap;

use crate::Point3;

/// Parent value marking a root sample.
pub const NO_PARENT: i64 = -1;

/// Compartment type code of a sample.
///
/// The SWC standard assigns the low codes; anything else shows up in the
/// wild as tool-specific extensions and is kept verbatim in [`Custom`].
///
/// [`Custom`]: CompartmentKind::Custom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompartmentKind {
    /// Code 1, the cell body.
    Soma,
    /// Code 2.
    Axon,
    /// Code 3, a basal dendrite.
    Dendrite,
    /// Code 4.
    ApicalDendrite,
    /// Code 10. Appears in some exports but carries no geometry.
    Reserved,
    /// Any other code.
    Custom(i64),
}

impl CompartmentKind {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Soma,
            2 => Self::Axon,
            3 => Self::Dendrite,
            4 => Self::ApicalDendrite,
            10 => Self::Reserved,
            other => Self::Custom(other),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Self::Soma => 1,
            Self::Axon => 2,
            Self::Dendrite => 3,
            Self::ApicalDendrite => 4,
            Self::Reserved => 10,
            Self::Custom(code) => code,
        }
    }

    /// Key identifying the material/palette entry for this kind.
    pub fn material_key(self) -> &'static str {
        match self {
            Self::Soma => "soma",
            Self::Axon => "axon",
            Self::Dendrite => "dendrite",
            Self::ApicalDendrite => "apical_dendrite",
            Self::Reserved | Self::Custom(_) => "default",
        }
    }
}

/// One point sample from an SWC file, in file units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub id: i64,
    pub kind: CompartmentKind,
    pub position: Point3,
    /// Radius of the neurite at this point.
    pub radius: f64,
    /// Id of the parent sample, or [`NO_PARENT`] for a root.
    pub parent: i64,
}

impl Sample {
    /// Whether this sample starts a tree rather than continuing one.
    pub fn is_root(&self) -> bool {
        self.parent == NO_PARENT
    }
}

/// All samples of one file, keyed by id.
///
/// We use a `LinkedHashMap` so iteration follows the order samples appear
/// in the file; that order is what drives branch reconstruction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleTable {
    samples: LinkedHashMap<i64, Sample>,
}

impl SampleTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a sample. A duplicate id overwrites the earlier sample but
    /// keeps its original place in the file order.
    pub(crate) fn insert(&mut self, sample: Sample) {
        // `LinkedHashMap::insert` moves an existing key to the back of the
        // order; update in place instead so the original position is kept.
        if let Some(existing) = self.samples.get_mut(&sample.id) {
            *existing = sample;
        } else {
            self.samples.insert(sample.id, sample);
        }
    }

    /// Looks up a sample by id.
    pub fn get(&self, id: i64) -> Option<&Sample> {
        self.samples.get(&id)
    }

    /// Iterates samples in file order.
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.values()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl<'a> IntoIterator for &'a SampleTable {
    type Item = &'a Sample;
    type IntoIter = linked_hash_map::Values<'a, i64, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.values()
    }
}
