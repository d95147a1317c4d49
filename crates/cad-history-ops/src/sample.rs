//! Built-in sample project: a robotic arm developed on three branches.

use std::collections::BTreeMap;

use cad_history_core::{AssemblyNode, Branch, Commit, CommitId, Project};

use crate::data::ProjectData;

impl ProjectData {
    /// Robotic arm project with ten commits and trees for the two newest
    /// trunk commits.
    pub fn sample() -> Self {
        let project = Project {
            id: "proj-1".to_string(),
            name: "Robotic Arm Assembly".to_string(),
            description: Some("6-DOF robotic arm for manufacturing automation".to_string()),
            branches: vec![
                Branch::new("main", "main", "#3b82f6").with_commit_count(12),
                Branch::new("lightweight", "lightweight", "#10b981").with_commit_count(8),
                Branch::new("extended", "extended", "#f59e0b").with_commit_count(5),
            ],
        };

        let commits = vec![
            Commit::new("commit-1", "Initial robotic arm concept", "main")
                .by("John Smith")
                .at("2025-08-01T09:00:00Z")
                .positioned(50.0, 50.0),
            Commit::new("commit-2", "Added base plate design", "main")
                .by("Sarah Johnson")
                .at("2025-08-02T11:30:00Z")
                .positioned(150.0, 50.0)
                .child_of("commit-1"),
            Commit::new("commit-3", "Integrated motor mount system", "main")
                .by("Mike Chen")
                .at("2025-08-03T14:15:00Z")
                .positioned(250.0, 50.0)
                .child_of("commit-2"),
            Commit::new("commit-4", "Added arm segments with joints", "main")
                .by("John Smith")
                .at("2025-08-04T16:45:00Z")
                .positioned(350.0, 50.0)
                .child_of("commit-3"),
            Commit::new("commit-5", "Lightweight materials exploration", "lightweight")
                .by("Sarah Johnson")
                .at("2025-08-05T10:20:00Z")
                .positioned(450.0, 120.0)
                .child_of("commit-4"),
            Commit::new("commit-6", "Extended reach prototype", "extended")
                .by("Mike Chen")
                .at("2025-08-05T15:30:00Z")
                .positioned(450.0, 180.0)
                .child_of("commit-4"),
            Commit::new("commit-7", "Optimized joint bearings", "main")
                .by("Sarah Johnson")
                .at("2025-08-09T10:15:00Z")
                .positioned(450.0, 50.0)
                .child_of("commit-4"),
            Commit::new("commit-8", "Added gripper mechanism", "main")
                .by("John Smith")
                .at("2025-08-10T14:30:00Z")
                .positioned(550.0, 50.0)
                .child_of("commit-7"),
            Commit::new("commit-9", "Carbon fiber arm segments", "lightweight")
                .by("Sarah Johnson")
                .at("2025-08-11T09:00:00Z")
                .positioned(550.0, 120.0)
                .child_of("commit-5"),
            Commit::new("commit-10", "Extended base for stability", "extended")
                .by("Mike Chen")
                .at("2025-08-11T14:00:00Z")
                .positioned(550.0, 180.0)
                .child_of("commit-6"),
        ];

        let mut trees = BTreeMap::new();
        trees.insert(
            CommitId::new("commit-8"),
            arm(vec![
                base_assembly(),
                arm_segments("Joint_Bearing.SLDPRT"),
                gripper_assembly(),
            ]),
        );
        trees.insert(
            CommitId::new("commit-7"),
            arm(vec![
                base_assembly(),
                arm_segments("Joint_Bearing_Optimized.SLDPRT"),
            ]),
        );

        Self {
            project,
            commits,
            trees,
        }
    }
}

fn arm(children: Vec<AssemblyNode>) -> AssemblyNode {
    AssemblyNode::assembly("RoboticArm_Assembly.SLDASM", children)
}

fn base_assembly() -> AssemblyNode {
    AssemblyNode::assembly(
        "Base_Assembly.SLDASM",
        vec![
            AssemblyNode::part("Base_Plate.SLDPRT", Some("2.4 MB")),
            AssemblyNode::part("Motor_Mount.SLDPRT", Some("1.8 MB")),
            AssemblyNode::part("Base_Motor.SLDPRT", Some("3.2 MB")),
        ],
    )
}

fn arm_segments(bearing: &str) -> AssemblyNode {
    AssemblyNode::assembly(
        "Arm_Segments.SLDASM",
        vec![
            AssemblyNode::part("Lower_Arm.SLDPRT", Some("4.1 MB")),
            AssemblyNode::part("Upper_Arm.SLDPRT", Some("3.8 MB")),
            AssemblyNode::part(bearing, Some("0.9 MB")),
        ],
    )
}

fn gripper_assembly() -> AssemblyNode {
    AssemblyNode::assembly(
        "Gripper_Assembly.SLDASM",
        vec![
            AssemblyNode::part("Gripper_Base.SLDPRT", Some("1.5 MB")),
            AssemblyNode::part("Gripper_Jaw_Left.SLDPRT", Some("1.2 MB")),
            AssemblyNode::part("Gripper_Jaw_Right.SLDPRT", Some("1.2 MB")),
            AssemblyNode::part("Pneumatic_Cylinder.SLDPRT", Some("2.1 MB")),
        ],
    )
}
