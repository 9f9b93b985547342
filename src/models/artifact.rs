/// The five output artifacts of a generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    InteractionElements,
    VisualizationElements,
    States,
    Transitions,
    Usage,
}

impl ArtifactKind {
    /// Canonical write order; the usage document goes last
    pub const ALL: [ArtifactKind; 5] = [
        ArtifactKind::InteractionElements,
        ArtifactKind::VisualizationElements,
        ArtifactKind::States,
        ArtifactKind::Transitions,
        ArtifactKind::Usage,
    ];

    /// The four structured JSON sections, in request order
    pub const JSON_SECTIONS: [ArtifactKind; 4] = [
        ArtifactKind::InteractionElements,
        ArtifactKind::VisualizationElements,
        ArtifactKind::States,
        ArtifactKind::Transitions,
    ];

    /// Fixed file name inside the output directory
    pub fn file_name(self) -> &'static str {
        match self {
            ArtifactKind::InteractionElements => "InteractionElements.json",
            ArtifactKind::VisualizationElements => "VisualizationElements.json",
            ArtifactKind::States => "States.json",
            ArtifactKind::Transitions => "Transitions.json",
            ArtifactKind::Usage => "USAGE.md",
        }
    }

    /// Key the combined response mode uses for this artifact
    pub fn section_key(self) -> &'static str {
        match self {
            ArtifactKind::InteractionElements => "interaction",
            ArtifactKind::VisualizationElements => "visualization",
            ArtifactKind::States => "states",
            ArtifactKind::Transitions => "transitions",
            ArtifactKind::Usage => "usage",
        }
    }
}
