use fastrand::Rng;

use super::cluster::ClusterError;
use crate::config::ClusterParams;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KMeansParams {
    pub k: usize,
    pub seed: u64,
    pub max_iter: usize,
    /// Independent k-means++ starts; the lowest inertia wins.
    pub restarts: usize,
    /// Stop once the summed squared centroid shift falls to this value.
    pub tolerance: f64,
}

impl From<&ClusterParams> for KMeansParams {
    fn from(p: &ClusterParams) -> Self {
        Self {
            k: p.clusters,
            seed: p.cluster_seed,
            max_iter: p.cluster_max_iter,
            restarts: p.cluster_restarts,
            tolerance: p.cluster_tolerance,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KMeansModel<const D: usize> {
    pub centroids: Vec<[f64; D]>,
    pub labels: Vec<usize>,
    pub inertia: f64,
    pub iterations: usize,
}

impl<const D: usize> KMeansModel<D> {
    pub fn predict(&self, point: &[f64; D]) -> usize {
        nearest(point, &self.centroids).0
    }
}

/// Scales every feature to zero mean and unit (population) variance.
/// Constant features are only centered.
pub fn standardize<const D: usize>(features: &[[f64; D]]) -> Vec<[f64; D]> {
    if features.is_empty() {
        return Vec::new();
    }
    let n = features.len() as f64;

    let mut means = [0.0; D];
    for f in features {
        for d in 0..D {
            means[d] += f[d];
        }
    }
    for m in &mut means {
        *m /= n;
    }

    let mut scales = [0.0; D];
    for f in features {
        for d in 0..D {
            let diff = f[d] - means[d];
            scales[d] += diff * diff;
        }
    }
    for s in &mut scales {
        *s = (*s / n).sqrt();
        if *s == 0.0 {
            *s = 1.0;
        }
    }

    features
        .iter()
        .map(|f| {
            let mut out = [0.0; D];
            for d in 0..D {
                out[d] = (f[d] - means[d]) / scales[d];
            }
            out
        })
        .collect()
}

/// Lloyd's algorithm with k-means++ seeding, deterministic for a given seed.
pub fn fit_kmeans<const D: usize>(
    points: &[[f64; D]],
    params: &KMeansParams,
) -> Result<KMeansModel<D>, ClusterError> {
    let k = params.k;
    if k == 0 || points.len() < k {
        return Err(ClusterError::InvalidClusterCount {
            k,
            points: points.len(),
        });
    }
    if let Some(idx) = points.iter().position(|p| p.iter().any(|v| !v.is_finite())) {
        return Err(ClusterError::NonFiniteFeature(idx));
    }

    let mut rng = Rng::with_seed(params.seed);
    let mut best: Option<KMeansModel<D>> = None;

    for _ in 0..params.restarts.max(1) {
        let centroids = init_plus_plus(points, k, &mut rng);
        let model = lloyd(points, centroids, params.max_iter.max(1), params.tolerance);

        if best.as_ref().map_or(true, |b| model.inertia < b.inertia) {
            best = Some(model);
        }
    }

    best.filter(|m| m.inertia.is_finite()).ok_or(ClusterError::Degenerate)
}

fn init_plus_plus<const D: usize>(points: &[[f64; D]], k: usize, rng: &mut Rng) -> Vec<[f64; D]> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.usize(..points.len())]);

    let mut dists: Vec<f64> = points.iter().map(|p| sq_dist(p, &centroids[0])).collect();

    while centroids.len() < k {
        let total: f64 = dists.iter().sum();

        let next = if total > 0.0 {
            // Sample proportional to squared distance
            let mut target = rng.f64() * total;
            let mut chosen = dists.iter().rposition(|&d| d > 0.0).unwrap_or(0);
            for (i, &d) in dists.iter().enumerate() {
                if target < d {
                    chosen = i;
                    break;
                }
                target -= d;
            }
            chosen
        } else {
            rng.usize(..points.len())
        };

        let c = points[next];
        for (d, p) in dists.iter_mut().zip(points) {
            *d = d.min(sq_dist(p, &c));
        }
        centroids.push(c);
    }

    centroids
}

fn lloyd<const D: usize>(
    points: &[[f64; D]],
    mut centroids: Vec<[f64; D]>,
    max_iter: usize,
    tolerance: f64,
) -> KMeansModel<D> {
    let k = centroids.len();
    let mut labels = vec![0usize; points.len()];
    let mut iterations = 0;

    for _ in 0..max_iter {
        iterations += 1;

        for (label, p) in labels.iter_mut().zip(points) {
            *label = nearest(p, &centroids).0;
        }

        let mut sums = vec![[0.0; D]; k];
        let mut counts = vec![0usize; k];
        for (&label, p) in labels.iter().zip(points) {
            counts[label] += 1;
            for d in 0..D {
                sums[label][d] += p[d];
            }
        }

        let mut shift = 0.0;
        for c in 0..k {
            // An emptied cluster keeps its previous centroid
            if counts[c] == 0 {
                continue;
            }
            let mut updated = [0.0; D];
            for d in 0..D {
                updated[d] = sums[c][d] / counts[c] as f64;
            }
            shift += sq_dist(&updated, &centroids[c]);
            centroids[c] = updated;
        }

        if shift <= tolerance {
            break;
        }
    }

    let mut inertia = 0.0;
    for (label, p) in labels.iter_mut().zip(points) {
        let (idx, dist) = nearest(p, &centroids);
        *label = idx;
        inertia += dist;
    }

    KMeansModel {
        centroids,
        labels,
        inertia,
        iterations,
    }
}

/// Index of and squared distance to the closest centroid (first on ties).
#[inline(always)]
fn nearest<const D: usize>(p: &[f64; D], centroids: &[[f64; D]]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (i, c) in centroids.iter().enumerate() {
        let d = sq_dist(p, c);
        if d < best.1 {
            best = (i, d);
        }
    }
    best
}

#[inline(always)]
fn sq_dist<const D: usize>(a: &[f64; D], b: &[f64; D]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
