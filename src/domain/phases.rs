//! Phase names sent to the travel-time engine, kept in request order.

pub const DEFAULT_MODEL: &str = "ak135";

pub const SUPPORTED_MODELS: &[&str] = &["iasp91", "ak135", "ak135f", "prem", "jb", "herrin", "sp6"];

pub const ARRIVAL_PHASES: &[&str] = &[
    "P", "Pdiff", "pPdiff", "S", "PP", "PS", "SS", "SP", "PPP", "PPS", "PSS", "SSS", "SSP", "SPP",
    "PcP", "ScS", "ScP", "PKP", "PKS", "SKS", "SKP", "PKKP", "PKKS", "SKKS", "SKKP", "SKKKS",
    "PcPPKP", "PcSPKP", "ScSP", "ScsPKP", "ScPPKP", "PKPPcP", "PKPPcS", "PKPScS", "PKPPKP",
    "PKPPKS", "PKPSKP", "PKSPKP", "SKPPKP", "SKSP", "PKPPKPPKP", "PKiKP", "pP", "Pn", "Pg", "Sn",
    "Sg",
];

pub const RAY_PATH_PHASES: &[&str] = &[
    "P", "Pdiff", "Pn", "Pg", "PmP", "PcP", "PP", "PKiKP", "S", "Sn", "Sg", "SmS", "SS", "ScS",
];
