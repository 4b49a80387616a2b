use crate::processors::correlation::DistanceMatrix;

/// One merge step: the two cluster ids joined, the linkage distance at
/// which they joined, and the size of the resulting cluster.
#[derive(Debug, Clone)]
pub struct Merge {
    pub left: usize,
    pub right: usize,
    pub distance: f64,
    pub size: usize,
}

/// Merge history of an agglomerative clustering run.
///
/// Leaves are numbered 0..n-1 in label order; merge k creates cluster id
/// n + k. The last merge is the tree root.
#[derive(Debug, Clone)]
pub struct Dendrogram {
    pub labels: Vec<String>,
    pub merges: Vec<Merge>,
}

impl Dendrogram {
    pub fn leaf_count(&self) -> usize {
        self.labels.len()
    }

    /// Left-to-right leaf ordering implied by the merge tree.
    pub fn leaf_order(&self) -> Vec<usize> {
        if self.merges.is_empty() {
            return (0..self.labels.len()).collect();
        }
        let root = self.labels.len() + self.merges.len() - 1;
        let mut order = Vec::with_capacity(self.labels.len());
        self.collect_leaves(root, &mut order);
        order
    }

    fn collect_leaves(&self, id: usize, order: &mut Vec<usize>) {
        let n = self.labels.len();
        if id < n {
            order.push(id);
        } else {
            let merge = &self.merges[id - n];
            self.collect_leaves(merge.left, order);
            self.collect_leaves(merge.right, order);
        }
    }
}

struct Cluster {
    id: usize,
    members: Vec<usize>,
}

/// Average-linkage (UPGMA) agglomerative clustering over a precomputed
/// distance matrix.
///
/// Inter-cluster distance is the mean pairwise distance between members,
/// taken from the original matrix. Ties merge in discovery order.
pub fn average_linkage(distance: &DistanceMatrix) -> Dendrogram {
    let n = distance.len();
    let mut clusters: Vec<Cluster> = (0..n)
        .map(|i| Cluster {
            id: i,
            members: vec![i],
        })
        .collect();
    let mut merges = Vec::with_capacity(n.saturating_sub(1));
    let mut next_id = n;

    while clusters.len() > 1 {
        let mut best = (0usize, 1usize, f64::INFINITY);
        for i in 0..clusters.len() {
            for j in (i + 1)..clusters.len() {
                let d = linkage_distance(&clusters[i], &clusters[j], distance);
                if d < best.2 {
                    best = (i, j, d);
                }
            }
        }

        let (i, j, d) = best;
        // j > i, so removing j first leaves i stable
        let right = clusters.swap_remove(j);
        let left = clusters.swap_remove(i);

        let size = left.members.len() + right.members.len();
        merges.push(Merge {
            left: left.id,
            right: right.id,
            distance: d,
            size,
        });

        let mut members = left.members;
        members.extend(right.members);
        clusters.push(Cluster {
            id: next_id,
            members,
        });
        next_id += 1;
    }

    Dendrogram {
        labels: distance.labels.clone(),
        merges,
    }
}

fn linkage_distance(a: &Cluster, b: &Cluster, distance: &DistanceMatrix) -> f64 {
    let mut sum = 0.0;
    for &p in &a.members {
        for &q in &b.members {
            sum += distance.get(p, q);
        }
    }
    sum / (a.members.len() * b.members.len()) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(labels: &[&str], values: Vec<Vec<f64>>) -> DistanceMatrix {
        DistanceMatrix {
            labels: labels.iter().map(|l| l.to_string()).collect(),
            values,
        }
    }

    #[test]
    fn test_closest_pair_merges_first() {
        let distance = matrix(
            &["a", "b", "c"],
            vec![
                vec![0.0, 0.1, 0.9],
                vec![0.1, 0.0, 0.7],
                vec![0.9, 0.7, 0.0],
            ],
        );

        let dendrogram = average_linkage(&distance);
        assert_eq!(dendrogram.merges.len(), 2);

        let first = &dendrogram.merges[0];
        assert_eq!((first.left, first.right), (0, 1));
        assert_eq!(first.distance, 0.1);
        assert_eq!(first.size, 2);
    }

    #[test]
    fn test_average_linkage_height() {
        let distance = matrix(
            &["a", "b", "c"],
            vec![
                vec![0.0, 0.1, 0.9],
                vec![0.1, 0.0, 0.7],
                vec![0.9, 0.7, 0.0],
            ],
        );

        let dendrogram = average_linkage(&distance);
        let last = &dendrogram.merges[1];
        // Mean of d(a,c) and d(b,c)
        assert!((last.distance - 0.8).abs() < 1e-12);
        assert_eq!(last.size, 3);
        // Joins leaf c (id 2) with the first merged cluster (id 3)
        assert_eq!((last.left, last.right), (2, 3));
    }

    #[test]
    fn test_leaf_order_covers_every_leaf() {
        let distance = matrix(
            &["a", "b", "c", "d"],
            vec![
                vec![0.0, 0.2, 0.9, 0.8],
                vec![0.2, 0.0, 0.85, 0.9],
                vec![0.9, 0.85, 0.0, 0.1],
                vec![0.8, 0.9, 0.1, 0.0],
            ],
        );

        let dendrogram = average_linkage(&distance);
        let mut order = dendrogram.leaf_order();
        assert_eq!(order.len(), 4);
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_single_leaf_has_no_merges() {
        let distance = matrix(&["a"], vec![vec![0.0]]);
        let dendrogram = average_linkage(&distance);
        assert!(dendrogram.merges.is_empty());
        assert_eq!(dendrogram.leaf_order(), vec![0]);
    }
}
