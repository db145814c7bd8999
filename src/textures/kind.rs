use std::fmt;

/// Texture roles recognised by the importers.
///
/// Parsed once from the map code of a filename; everything downstream matches
/// on the variant instead of comparing strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapKind {
    Albedo,
    AmbientOcclusion,
    Roughness,
    Metallic,
    Normal,
    Opacity,
    EmissionMask,
    Emission,
    TintColor,
}

impl MapKind {
    pub const ALL: [MapKind; 9] = [
        MapKind::Albedo,
        MapKind::AmbientOcclusion,
        MapKind::Roughness,
        MapKind::Metallic,
        MapKind::Normal,
        MapKind::Opacity,
        MapKind::EmissionMask,
        MapKind::Emission,
        MapKind::TintColor,
    ];

    /// Case-sensitive: `Alb` is albedo, `alb` is unknown.
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "Alb" => MapKind::Albedo,
            "Ao" => MapKind::AmbientOcclusion,
            "Rgh" => MapKind::Roughness,
            "Mtl" => MapKind::Metallic,
            "Nrm" => MapKind::Normal,
            "Opa" => MapKind::Opacity,
            "Emm" => MapKind::EmissionMask,
            "Emi" => MapKind::Emission,
            "Tcl" => MapKind::TintColor,
            _ => return None,
        })
    }

    pub fn code(self) -> &'static str {
        match self {
            MapKind::Albedo => "Alb",
            MapKind::AmbientOcclusion => "Ao",
            MapKind::Roughness => "Rgh",
            MapKind::Metallic => "Mtl",
            MapKind::Normal => "Nrm",
            MapKind::Opacity => "Opa",
            MapKind::EmissionMask => "Emm",
            MapKind::Emission => "Emi",
            MapKind::TintColor => "Tcl",
        }
    }

    /// Maps that hold color data; everything else is read as raw values.
    pub fn is_color(self) -> bool {
        matches!(self, MapKind::Albedo | MapKind::AmbientOcclusion)
    }
}

impl fmt::Display for MapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for kind in MapKind::ALL {
            assert_eq!(MapKind::from_code(kind.code()), Some(kind));
        }
    }

    #[test]
    fn test_unknown_and_wrong_case() {
        assert_eq!(MapKind::from_code("alb"), None);
        assert_eq!(MapKind::from_code("2cl"), None);
        assert_eq!(MapKind::from_code("AO"), None);
    }
}
