//! District and island-group table used to key forecast locations

/// Numeric district ids published by IPMA and their display names.
///
/// 29 entries rather than the 20 administrative districts: IPMA keys the two
/// autonomous regions by island, so the 18 mainland districts (1-18) are
/// followed by the two Madeira islands (31-32) and the nine Azores islands
/// (41-49).
pub const DISTRICTS: &[(u32, &str)] = &[
    (1, "Aveiro"),
    (2, "Beja"),
    (3, "Braga"),
    (4, "Bragança"),
    (5, "Castelo Branco"),
    (6, "Coimbra"),
    (7, "Évora"),
    (8, "Faro"),
    (9, "Guarda"),
    (10, "Leiria"),
    (11, "Lisboa"),
    (12, "Portalegre"),
    (13, "Porto"),
    (14, "Santarém"),
    (15, "Setúbal"),
    (16, "Viana do Castelo"),
    (17, "Vila Real"),
    (18, "Viseu"),
    (31, "Ilha da Madeira"),
    (32, "Ilha de Porto Santo"),
    (41, "Ilha de Santa Maria"),
    (42, "Ilha de São Miguel"),
    (43, "Ilha Terceira"),
    (44, "Ilha da Graciosa"),
    (45, "Ilha de São Jorge"),
    (46, "Ilha do Pico"),
    (47, "Ilha do Faial"),
    (48, "Ilha das Flores"),
    (49, "Ilha do Corvo"),
];

/// Resolve a numeric district id to its display name
pub fn district_name(district_id: u32) -> Option<&'static str> {
    DISTRICTS
        .iter()
        .find(|(id, _)| *id == district_id)
        .map(|(_, name)| *name)
}

/// Normalize a district name into the lookup key used by the location table
pub fn district_key(name: &str) -> String {
    name.trim().to_lowercase()
}
