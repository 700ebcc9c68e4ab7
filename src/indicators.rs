//! Catalogue of the environmental-impact indicators carried by each respondent.

use serde::Serialize;

/// Number of indicators in the catalogue.
pub const INDICATOR_COUNT: usize = 9;

/// One environmental-impact metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Indicator {
    GreenhouseGas,
    LandUse,
    WaterScarcity,
    Eutrophication,
    Methane,
    NitrousOxide,
    Biodiversity,
    WaterUse,
    Acidification,
}

impl Indicator {
    /// All indicators in radar-axis order.
    pub const ALL: [Indicator; INDICATOR_COUNT] = [
        Indicator::GreenhouseGas,
        Indicator::LandUse,
        Indicator::WaterScarcity,
        Indicator::Eutrophication,
        Indicator::Methane,
        Indicator::NitrousOxide,
        Indicator::Biodiversity,
        Indicator::WaterUse,
        Indicator::Acidification,
    ];

    /// Column name in the results file.
    pub fn column(self) -> &'static str {
        match self {
            Indicator::GreenhouseGas => "mean_ghgs",
            Indicator::LandUse => "mean_land",
            Indicator::WaterScarcity => "mean_watscar",
            Indicator::Eutrophication => "mean_eut",
            Indicator::Methane => "mean_ghgs_ch4",
            Indicator::NitrousOxide => "mean_ghgs_n2o",
            Indicator::Biodiversity => "mean_bio",
            Indicator::WaterUse => "mean_watuse",
            Indicator::Acidification => "mean_acid",
        }
    }

    /// Human-readable axis label.
    pub fn label(self) -> &'static str {
        match self {
            Indicator::GreenhouseGas => "Greenhouse Gas Emissions",
            Indicator::LandUse => "Land Use",
            Indicator::WaterScarcity => "Water Scarcity",
            Indicator::Eutrophication => "Eutrophication Potential",
            Indicator::Methane => "Methane Emissions",
            Indicator::NitrousOxide => "Nitrous Oxide Emissions",
            Indicator::Biodiversity => "Biodiversity Impact",
            Indicator::WaterUse => "Agricultural Water Use",
            Indicator::Acidification => "Acidification Potential",
        }
    }

    /// Position of this indicator in [`Indicator::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl Serialize for Indicator {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// One value per indicator, indexed by [`Indicator::index`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IndicatorValues(pub [f64; INDICATOR_COUNT]);

impl IndicatorValues {
    pub fn get(&self, indicator: Indicator) -> f64 {
        self.0[indicator.index()]
    }

    pub fn set(&mut self, indicator: Indicator, value: f64) {
        self.0[indicator.index()] = value;
    }

    /// Returns a new set with `f` applied to every `(indicator, value)` pair.
    pub fn map(&self, mut f: impl FnMut(Indicator, f64) -> f64) -> Self {
        let mut out = Self::default();
        for indicator in Indicator::ALL {
            out.set(indicator, f(indicator, self.get(indicator)));
        }
        out
    }
}
