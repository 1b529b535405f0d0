//! The four FAOSTAT datasets the dashboard reads.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    LandUse,
    Temperature,
    Emissions,
    CropsLivestock,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 4] = [
        DatasetKind::LandUse,
        DatasetKind::Temperature,
        DatasetKind::Emissions,
        DatasetKind::CropsLivestock,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DatasetKind::LandUse => "Land Use",
            DatasetKind::Temperature => "Temperature",
            DatasetKind::Emissions => "Emissions",
            DatasetKind::CropsLivestock => "Crops & Livestock",
        }
    }

    /// File name as published in the FAOSTAT bulk download folder.
    pub fn default_file_name(self) -> &'static str {
        match self {
            DatasetKind::LandUse => "Faostat Landuse Data (2000-2023).csv",
            DatasetKind::Temperature => "Faostat Temperature Change on Land (2000-2023).csv",
            DatasetKind::Emissions => "Faostat Emissions Total (2000-2022).csv",
            DatasetKind::CropsLivestock => "Faostat Corps and Livstock (2000-2023).csv",
        }
    }

    /// Per-row identifier columns kept through the melt.
    pub fn id_columns(self) -> &'static [&'static str] {
        match self {
            DatasetKind::LandUse => &[
                "Area Code",
                "Area Code (M49)",
                "Area",
                "Item Code",
                "Item",
                "Element Code",
                "Element",
                "Unit",
            ],
            DatasetKind::Temperature => &[
                "Area Code",
                "Area Code (M49)",
                "Area",
                "Months Code",
                "Months",
                "Element Code",
                "Element",
                "Unit",
            ],
            DatasetKind::Emissions => &[
                "Area Code",
                "Area Code (M49)",
                "Area",
                "Item Code",
                "Item",
                "Element Code",
                "Element",
                "Source Code",
                "Source",
                "Unit",
            ],
            DatasetKind::CropsLivestock => &[
                "Area Code",
                "Area Code (M49)",
                "Area",
                "Item Code",
                "Item Code (CPC)",
                "Item",
                "Element Code",
                "Element",
                "Unit",
            ],
        }
    }
}
