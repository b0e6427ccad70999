use serde::{Deserialize, Serialize};

/// Field holding the user's writing sample; required only for the custom style.
pub const CUSTOM_STYLE_FIELD: &str = "customStyleDetails";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
}

impl FieldDescriptor {
    pub fn new(key: &str, label: &str, required: bool) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            required,
        }
    }

    pub fn is_custom_style(&self) -> bool {
        self.key == CUSTOM_STYLE_FIELD
    }
}

/// The questionnaire shown by the introduction form.
pub fn default_fields() -> Vec<FieldDescriptor> {
    [
        (
            CUSTOM_STYLE_FIELD,
            "Please paste your preferred introduction writing style / sample here",
            false,
        ),
        ("mainQuery", "Please enter your main query / research question", true),
        (
            "centralPhenomenon",
            "What is the central phenomenon of your study?",
            false,
        ),
        (
            "independentVariable",
            "What are the independent variables in the study?",
            false,
        ),
        ("background", "Please enter the background of your research", true),
        ("significance", "Please enter the significance of your research", true),
        ("proposedHypothesis", "Please enter proposed hypothesis, if any", false),
        (
            "underpinningTheories",
            "Please enter the underpinning theory/theories you are using",
            false,
        ),
        ("researchMethodology", "Briefly describe your research methodology", false),
        (
            "journalScope",
            "Please mention the name and scope of the journal you want to publish",
            false,
        ),
        (
            "context",
            "Please mention the context of the research i.e. industry, employee orientation, workplace etc.",
            false,
        ),
        (
            "instructions",
            "Are there any special instructions you want the program to focus on?",
            false,
        ),
        (
            "boundaryConditions",
            "What are the boundary conditions/moderators in the study?",
            false,
        ),
        ("mediators", "What are the mediators in the study?", false),
        ("mustIncludeArgument", "Any must-include argument in the introduction?", false),
    ]
    .into_iter()
    .map(|(key, label, required)| FieldDescriptor::new(key, label, required))
    .collect()
}
