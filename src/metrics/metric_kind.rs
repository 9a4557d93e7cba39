use strum::{Display, EnumIter};

/// The metrics reported for every URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum MetricKind {
    #[strum(serialize = "License")]
    License,

    #[strum(serialize = "RampUp")]
    RampUp,

    #[strum(serialize = "Correctness")]
    Correctness,

    #[strum(serialize = "ResponsiveMaintainer")]
    ResponsiveMaintainer,

    /// Reserved; always reported as not implemented
    #[strum(serialize = "BusFactor")]
    BusFactor,
}
