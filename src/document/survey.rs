//! The mining impact survey definition.
//!
//! The questionnaire has three steps: a general overview of the project,
//! the socioeconomic dimension and the environmental dimension. Section
//! and field identifiers follow the naming conventions decoded by
//! [`crate::document::naming`].

use super::{Card, Control, Document, Section};

/// Card identifier of the overview step.
pub const OVERVIEW_CARD: &str = "overview";

/// Card identifier of the socioeconomic step.
pub const SOCIOECONOMIC_CARD: &str = "socioeconomic";

/// Card identifier of the environment step.
pub const ENVIRONMENT_CARD: &str = "environment";

/// Build the default survey document.
///
pub fn default_survey() -> Document {
    Document::new(vec![overview(), socioeconomic(), environment()])
}

fn overview() -> Card {
    Card::new(
        OVERVIEW_CARD,
        "Visió general del projecte",
        vec![Section::new(
            "accordionGeneral",
            "Dades generals",
            vec![
                Control::text("project_name", "project_name", "Nom del projecte"),
                Control::text("company_name", "company_name", "Nom de l'empresa"),
                Control::number("latitude", "latitude", "Latitud", Some(-90.0), Some(90.0)),
                Control::number("longitude", "longitude", "Longitud", Some(-180.0), Some(180.0)),
                Control::select(
                    "phase",
                    "phase",
                    "Fase del projecte",
                    &[
                        "Exploració",
                        "Construcció",
                        "Explotació",
                        "Tancament",
                        "Post-tancament",
                    ],
                ),
            ],
        )],
    )
}

fn socioeconomic() -> Card {
    Card::new(
        SOCIOECONOMIC_CARD,
        "Dimensió socioeconòmica",
        vec![
            Section::new(
                "accordionEmployment",
                "Ocupació",
                vec![
                    Control::number(
                        "local_jobs_pct",
                        "local_jobs_pct",
                        "Percentatge de llocs de treball locals",
                        Some(0.0),
                        Some(100.0),
                    ),
                    Control::checkbox(
                        "training_programs",
                        "training_programs",
                        "Programes de formació per a la plantilla",
                    ),
                ],
            ),
            Section::new(
                "accordionCommunity",
                "Comunitat",
                vec![
                    Control::radio("true-consultation", "consultation", "Consulta pública: Sí", false),
                    Control::radio("false-consultation", "consultation", "Consulta pública: No", false),
                    Control::multi_select(
                        "consultation_channels",
                        "Canals de consulta emprats",
                        &["Reunions obertes", "Enquestes", "Premsa local", "Web del projecte"],
                    )
                    .depends_on("question-consultation"),
                    Control::number(
                        "community_rating",
                        "community_rating",
                        "Valoració de la relació amb la comunitat (0-10)",
                        Some(0.0),
                        Some(10.0),
                    ),
                ],
            ),
        ],
    )
}

fn environment() -> Card {
    Card::new(
        ENVIRONMENT_CARD,
        "Dimensió ambiental",
        vec![
            Section::new(
                "accordionWater",
                "Aigua",
                vec![
                    Control::number(
                        "water_reuse_rating",
                        "water_reuse_rating",
                        "Grau de reutilització de l'aigua (0-10)",
                        Some(0.0),
                        Some(10.0),
                    ),
                    Control::checkbox(
                        "water_monitoring",
                        "water_monitoring",
                        "Monitoratge continu de la qualitat de l'aigua",
                    ),
                ],
            ),
            Section::new(
                "accordionBiodiversity",
                "Biodiversitat",
                vec![
                    Control::radio(
                        "true-protected_areas",
                        "protected_areas",
                        "Afecta espais protegits: Sí",
                        false,
                    ),
                    Control::radio(
                        "false-protected_areas",
                        "protected_areas",
                        "Afecta espais protegits: No",
                        false,
                    ),
                    Control::multi_select(
                        "mitigation_measures",
                        "Mesures de mitigació previstes",
                        &[
                            "Corredors ecològics",
                            "Revegetació",
                            "Trasllat d'espècies",
                            "Compensació d'hàbitats",
                        ],
                    )
                    .depends_on("question-protected_areas"),
                    Control::checkbox(
                        "restoration_plan",
                        "restoration_plan",
                        "Pla de restauració aprovat",
                    ),
                ],
            ),
        ],
    )
}
