use crate::core::io::StructureFormat;
use crate::core::io::ctfile::CtFile;
use crate::core::io::pdb::{PdbFile, PdbStructure};
use crate::core::io::traits::StructureFile;
use crate::core::models::molecule::MoleculeRecord;
use crate::core::utils::elements::vdw_radius;
use crate::core::utils::geometry::{projected_half_extent, sphere_volume};
use crate::engine::config::VolumeConfig;
use crate::engine::error::LoadError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::sampling::{make_rng, sample_directions};
use nalgebra::{Point3, Unit, Vector3};
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, info, instrument};

const TRIALS_PER_CHUNK: usize = 100;

/// Atom centres with their van der Waals radii, index-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomSpheres {
    positions: Vec<Point3<f64>>,
    radii: Vec<f64>,
}

impl AtomSpheres {
    /// # Errors
    ///
    /// [`LoadError::EmptyStructure`] for no atoms, [`LoadError::LengthMismatch`] if the two
    /// lists differ in length.
    pub fn new(positions: Vec<Point3<f64>>, radii: Vec<f64>) -> Result<Self, LoadError> {
        if positions.len() != radii.len() {
            return Err(LoadError::LengthMismatch {
                positions: positions.len(),
                radii: radii.len(),
            });
        }
        if positions.is_empty() {
            return Err(LoadError::EmptyStructure);
        }
        Ok(Self { positions, radii })
    }

    pub fn from_pdb(structure: &PdbStructure) -> Result<Self, LoadError> {
        let atoms = structure
            .atoms
            .iter()
            .map(|atom| (atom.serial, atom.element.as_str(), &atom.position));
        Self::from_atoms(atoms)
    }

    pub fn from_record(record: &MoleculeRecord) -> Result<Self, LoadError> {
        Self::from_atoms(record.atoms())
    }

    fn from_atoms<'a>(
        atoms: impl Iterator<Item = (usize, &'a str, &'a Point3<f64>)>,
    ) -> Result<Self, LoadError> {
        let mut positions = Vec::new();
        let mut radii = Vec::new();
        for (serial, element, position) in atoms {
            let radius = vdw_radius(element).ok_or_else(|| LoadError::UnknownRadius {
                serial,
                element: element.to_string(),
            })?;
            positions.push(*position);
            radii.push(radius);
        }
        Self::new(positions, radii)
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn half_extent(&self, direction: &Unit<Vector3<f64>>) -> f64 {
        projected_half_extent(&self.positions, &self.radii, direction)
    }
}

/// Result of a directional-sampling volume estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeEstimate {
    /// Mean of the per-trial sphere volumes, in cubic Angstroms.
    pub volume: f64,
    /// Sample standard deviation of the per-trial volumes; zero for a single trial.
    pub std_dev: f64,
    /// Mean projected half-extent, in Angstroms.
    pub mean_radius: f64,
    pub trials: usize,
}

impl VolumeEstimate {
    fn from_radii(radii: &[f64]) -> Self {
        let n = radii.len() as f64;
        let volumes: Vec<f64> = radii.iter().copied().map(sphere_volume).collect();
        let volume = volumes.iter().sum::<f64>() / n;
        let std_dev = if radii.len() > 1 {
            let ss: f64 = volumes.iter().map(|v| (v - volume).powi(2)).sum();
            (ss / (n - 1.0)).sqrt()
        } else {
            0.0
        };
        Self {
            volume,
            std_dev,
            mean_radius: radii.iter().sum::<f64>() / n,
            trials: radii.len(),
        }
    }
}

/// Reads the atom spheres of a structure file, choosing the reader from the extension.
pub fn load_spheres(path: &Path) -> Result<AtomSpheres, LoadError> {
    let format = StructureFormat::from_path(path);
    debug!(path = %path.display(), %format, "Loading structure for volume estimation.");
    match format {
        StructureFormat::Pdb => AtomSpheres::from_pdb(&PdbFile::read_from_path(path)?),
        StructureFormat::CtFile => AtomSpheres::from_record(&CtFile::read_from_path(path)?),
    }
}

/// Estimates the volume enclosed by `spheres` from `config.trials()` random directions.
///
/// Each trial projects every sphere onto a random axis and treats half the covered span as
/// the radius of a sphere; the estimate is the mean volume of those spheres. Directions
/// are drawn from one generator before any trial runs, so a fixed seed gives the same
/// estimate whether or not the trials run in parallel.
#[instrument(skip_all, name = "volume_estimation", fields(atoms = spheres.len(), trials = config.trials()))]
pub fn estimate(
    spheres: &AtomSpheres,
    config: &VolumeConfig,
    reporter: &ProgressReporter,
) -> VolumeEstimate {
    reporter.report(Progress::PhaseStart {
        name: "Volume Sampling",
    });

    let mut rng = make_rng(config.seed());
    let directions = sample_directions(config.trials(), &mut rng);

    reporter.report(Progress::TaskStart {
        total_steps: directions.len() as u64,
    });

    let evaluate_chunk = |chunk: &[Unit<Vector3<f64>>]| -> Vec<f64> {
        let radii = chunk.iter().map(|d| spheres.half_extent(d)).collect();
        reporter.report(Progress::TaskAdvance {
            steps: chunk.len() as u64,
        });
        radii
    };

    let chunks: Vec<Vec<f64>> = if config.parallel() {
        directions
            .par_chunks(TRIALS_PER_CHUNK)
            .map(&evaluate_chunk)
            .collect()
    } else {
        directions
            .chunks(TRIALS_PER_CHUNK)
            .map(&evaluate_chunk)
            .collect()
    };
    let radii: Vec<f64> = chunks.into_iter().flatten().collect();

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let estimate = VolumeEstimate::from_radii(&radii);
    info!(
        volume = estimate.volume,
        std_dev = estimate.std_dev,
        mean_radius = estimate.mean_radius,
        "Volume estimate complete."
    );
    estimate
}

/// Loads `path` and estimates its volume.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be read, holds no atoms, or contains an
/// element without a known radius. No sampling happens in that case.
pub fn run(
    path: &Path,
    config: &VolumeConfig,
    reporter: &ProgressReporter,
) -> Result<VolumeEstimate, LoadError> {
    let spheres = load_spheres(path)?;
    info!(path = %path.display(), atoms = spheres.len(), "Structure loaded.");
    Ok(estimate(&spheres, config, reporter))
}

/// Estimated molecular volume of a structure file in cubic Angstroms, using 1000 trials
/// and an OS-seeded generator.
pub fn estimate_volume<P: AsRef<Path>>(path: P) -> Result<f64, LoadError> {
    run(
        path.as_ref(),
        &VolumeConfig::default(),
        &ProgressReporter::new(),
    )
    .map(|estimate| estimate.volume)
}
