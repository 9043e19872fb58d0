//! The fixed stage ladder shown while a question is being processed.
//!
//! Stage progress is cosmetic: the backend does one opaque improvement call,
//! and the client walks these labels on a timer to give the wait a shape.

use std::time::Duration;

/// One display stage of the (animated, not real) reasoning pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub name: &'static str,
    pub description: &'static str,
}

/// How often the ticker advances to the next stage.
pub const STAGE_TICK: Duration = Duration::from_millis(2500);

pub const STAGES: [Stage; 7] = [
    Stage {
        name: "Initial Analysis",
        description: "Exploring the question structure, uncovering hidden assumptions, and identifying core themes.",
    },
    Stage {
        name: "Persona Insights",
        description: "Gathering multidisciplinary perspectives from each selected expert persona.",
    },
    Stage {
        name: "Critical Evaluation",
        description: "Examining insights through multiple lenses and surfacing counterpoints.",
    },
    Stage {
        name: "Synthesis",
        description: "Weaving diverse perspectives into a coherent understanding.",
    },
    Stage {
        name: "Refinement",
        description: "Enhancing precision, clarity, and depth while resolving contradictions.",
    },
    Stage {
        name: "Final Convergence",
        description: "Harmonizing collective wisdom into a consensus.",
    },
    Stage {
        name: "Output Generation",
        description: "Crafting the final question with supporting insights.",
    },
];
