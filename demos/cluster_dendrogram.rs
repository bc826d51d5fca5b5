use dendra::{
    extract, filter_linkage, weight_from_percent, DendrogramTree, DistanceMatrix, LinkageBuilder,
    LinkageMethod,
};
use ndarray::array;

fn main() {
    // 1. Two distance matrices over the same four genes, measuring
    //    different similarity aspects.
    let sequence = DistanceMatrix::from_array(array![
        [0.0, 1.0, 4.0, 4.0],
        [1.0, 0.0, 4.0, 4.0],
        [4.0, 4.0, 0.0, 1.0],
        [4.0, 4.0, 1.0, 0.0],
    ])
    .unwrap();
    let order = DistanceMatrix::from_array(array![
        [0.0, 2.0, 2.0, 6.0],
        [2.0, 0.0, 4.0, 4.0],
        [2.0, 4.0, 0.0, 2.0],
        [6.0, 4.0, 2.0, 0.0],
    ])
    .unwrap();

    // 2. Blend them with UI-style percentage weights.
    let weights = [weight_from_percent(75.0), weight_from_percent(25.0)];
    let combined = DistanceMatrix::combine(&[sequence, order], &weights).unwrap();

    // 3. Cluster and lay out the dendrogram.
    let labels: Vec<String> = ["geneA", "geneB", "geneC", "geneD"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let linkage = LinkageBuilder::new(LinkageMethod::Average)
        .build(&combined)
        .unwrap();
    println!("linkage table: {:?}", linkage.to_rows());

    let tree = DendrogramTree::from_linkage(&linkage, &labels).unwrap();
    let document = tree.to_document();
    println!(
        "dendrogram document:\n{}",
        serde_json::to_string_pretty(&document).unwrap()
    );

    // 4. Filter down to a selection and extract its leaf order.
    let (reduced, kept) = filter_linkage(&linkage, &labels, &[0, 2, 3]).unwrap();
    let leaves = extract(&reduced, &kept).unwrap();
    println!("filtered order: {:?}", leaves.labels);
    println!("band heights:   {:?}", leaves.band_heights);
}
