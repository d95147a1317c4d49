//! Integration tests for assembly tree navigation and node intents.

use cad_history_core::{AssemblyNode, CommitId, HistoryError};
use cad_history_tree::{AssemblyTree, DownloadScope, ExpansionState, ENTIRE_PROJECT};

fn root_sub_leaf() -> AssemblyNode {
    AssemblyNode::assembly(
        "Root",
        vec![AssemblyNode::assembly(
            "Sub",
            vec![AssemblyNode::part("Leaf", Some("1.2 MB"))],
        )],
    )
}

fn visible_paths(tree: &AssemblyTree, commit: &str) -> Vec<String> {
    tree.visible(commit).unwrap().map(|v| v.path).collect()
}

#[test]
fn test_expanding_reveals_one_level_at_a_time() {
    let mut tree = AssemblyTree::new([(CommitId::new("c1"), root_sub_leaf())]).unwrap();

    assert!(!tree.is_expanded("Root"));
    assert_eq!(visible_paths(&tree, "c1"), vec!["Root"]);

    assert!(tree.toggle("Root"));
    assert_eq!(visible_paths(&tree, "c1"), vec!["Root", "Root/Sub"]);

    assert!(tree.toggle("Root/Sub"));
    assert_eq!(
        visible_paths(&tree, "c1"),
        vec!["Root", "Root/Sub", "Root/Sub/Leaf"]
    );
}

#[test]
fn test_collapsed_ancestor_hides_expanded_descendants() {
    let mut tree = AssemblyTree::new([(CommitId::new("c1"), root_sub_leaf())])
        .unwrap()
        .with_expansion(ExpansionState::with_expanded(["Root", "Root/Sub"]));
    assert_eq!(visible_paths(&tree, "c1").len(), 3);

    tree.toggle("Root");
    assert!(tree.is_expanded("Root/Sub"));
    assert_eq!(visible_paths(&tree, "c1"), vec!["Root"]);

    tree.toggle("Root");
    assert_eq!(visible_paths(&tree, "c1").len(), 3);
}

#[test]
fn test_visible_depths() {
    let tree = AssemblyTree::new([(CommitId::new("c1"), root_sub_leaf())])
        .unwrap()
        .with_expansion(ExpansionState::with_expanded(["Root", "Root/Sub"]));

    let depths: Vec<_> = tree.visible("c1").unwrap().map(|v| v.depth).collect();
    assert_eq!(depths, vec![0, 1, 2]);
}

#[test]
fn test_download_intent_carries_path_verbatim() {
    let tree = AssemblyTree::new([(CommitId::new("c1"), root_sub_leaf())]).unwrap();
    let leaf = tree.find("c1", "Root/Sub/Leaf").unwrap();

    let intent = tree.request_download(leaf, "Root/Sub/Leaf");
    assert_eq!(intent.path, "Root/Sub/Leaf");
    assert_eq!(intent.node.name, "Leaf");
    assert_eq!(intent.node.size.as_deref(), Some("1.2 MB"));
    assert_eq!(intent.scope(), DownloadScope::Part);
    assert_eq!(intent.total_size_bytes(), 1_200_000);
    assert!(intent.total_size().starts_with("1.2"));
}

#[test]
fn test_subtree_download_counts_parts() {
    let tree = AssemblyTree::new([(CommitId::new("c1"), root_sub_leaf())]).unwrap();
    let sub = tree.find("c1", "Root/Sub").unwrap();

    let intent = tree.request_download(sub, "Root/Sub");
    assert_eq!(intent.scope(), DownloadScope::Subtree);
    assert_eq!(intent.files().len(), 1);
    assert_eq!(intent.files()[0].path, "Root/Sub/Leaf");
}

#[test]
fn test_fork_passes_path_through() {
    let tree = AssemblyTree::new([(CommitId::new("c1"), root_sub_leaf())]).unwrap();

    assert_eq!(tree.request_fork("Root/Sub").path, "Root/Sub");
    assert_eq!(tree.request_fork(ENTIRE_PROJECT).path, "entire-project");
    assert_eq!(tree.request_fork("No/Such/Node").path, "No/Such/Node");
}

#[test]
fn test_missing_tree_is_not_found() {
    let tree = AssemblyTree::new([(CommitId::new("c1"), root_sub_leaf())]).unwrap();

    match tree.load("c9") {
        Err(HistoryError::TreeNotFound { commit_id }) => assert_eq!(commit_id.as_str(), "c9"),
        other => panic!("expected TreeNotFound, got {other:?}"),
    }
    assert!(tree.visible("c9").is_err());
}

#[test]
fn test_expansion_survives_commit_switch() {
    let v1 = AssemblyNode::assembly(
        "Robotic_Arm.SLDASM",
        vec![
            AssemblyNode::part("Base_Plate.SLDPRT", Some("2.1 MB")),
            AssemblyNode::assembly(
                "Gripper_Assembly.SLDASM",
                vec![AssemblyNode::part("Gripper_Base.SLDPRT", Some("1.5 MB"))],
            ),
        ],
    );
    let v2 = AssemblyNode::assembly(
        "Robotic_Arm.SLDASM",
        vec![
            AssemblyNode::part("Base_Plate.SLDPRT", Some("2.1 MB")),
            AssemblyNode::assembly(
                "Gripper_Assembly.SLDASM",
                vec![
                    AssemblyNode::part("Gripper_Base.SLDPRT", Some("1.5 MB")),
                    AssemblyNode::part("Spring.SLDPRT", Some("0.2 MB")),
                ],
            ),
            AssemblyNode::assembly(
                "Renamed_Wrist.SLDASM",
                vec![AssemblyNode::part("Pin.SLDPRT", None)],
            ),
        ],
    );

    let mut tree =
        AssemblyTree::new([(CommitId::new("v1"), v1), (CommitId::new("v2"), v2)]).unwrap();
    tree.toggle("Robotic_Arm.SLDASM");
    tree.toggle("Robotic_Arm.SLDASM/Gripper_Assembly.SLDASM");
    assert_eq!(visible_paths(&tree, "v1").len(), 4);

    let after_switch = visible_paths(&tree, "v2");
    assert_eq!(
        after_switch,
        vec![
            "Robotic_Arm.SLDASM",
            "Robotic_Arm.SLDASM/Base_Plate.SLDPRT",
            "Robotic_Arm.SLDASM/Gripper_Assembly.SLDASM",
            "Robotic_Arm.SLDASM/Gripper_Assembly.SLDASM/Gripper_Base.SLDPRT",
            "Robotic_Arm.SLDASM/Gripper_Assembly.SLDASM/Spring.SLDPRT",
            "Robotic_Arm.SLDASM/Renamed_Wrist.SLDASM",
        ]
    );
    assert_eq!(tree.commit_ids().len(), 2);
}
