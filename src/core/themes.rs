use crate::domain::model::Theme;

pub static THEMES: [Theme; 9] = [
    Theme {
        id: "classic",
        name: "Classic",
        start_color: "#dc2626",
        end_color: "#16a34a",
        card_color: "#ef4444",
        sparkle_color: "#fde047",
    },
    Theme {
        id: "winter",
        name: "Winter",
        start_color: "#1e40af",
        end_color: "#ffffff",
        card_color: "#3b82f6",
        sparkle_color: "#e0e7ff",
    },
    Theme {
        id: "royal",
        name: "Royal",
        start_color: "#7c3aed",
        end_color: "#eab308",
        card_color: "#a855f7",
        sparkle_color: "#fbbf24",
    },
    Theme {
        id: "candy",
        name: "Candy",
        start_color: "#ec4899",
        end_color: "#dc2626",
        card_color: "#f472b6",
        sparkle_color: "#fda4af",
    },
    Theme {
        id: "golden",
        name: "Golden",
        start_color: "#d97706",
        end_color: "#eab308",
        card_color: "#f59e0b",
        sparkle_color: "#fde047",
    },
    Theme {
        id: "icy",
        name: "Icy",
        start_color: "#475569",
        end_color: "#0ea5e9",
        card_color: "#64748b",
        sparkle_color: "#bae6fd",
    },
    Theme {
        id: "forest",
        name: "Forest",
        start_color: "#059669",
        end_color: "#14b8a6",
        card_color: "#10b981",
        sparkle_color: "#6ee7b7",
    },
    Theme {
        id: "sunset",
        name: "Sunset",
        start_color: "#ea580c",
        end_color: "#f43f5e",
        card_color: "#f97316",
        sparkle_color: "#fb7185",
    },
    Theme {
        id: "aurora",
        name: "Aurora",
        start_color: "#4f46e5",
        end_color: "#d946ef",
        card_color: "#6366f1",
        sparkle_color: "#c084fc",
    },
];

/// 找不到時退回第一個主題
pub fn theme_by_id(id: &str) -> &'static Theme {
    THEMES.iter().find(|t| t.id == id).unwrap_or(&THEMES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_theme() {
        assert_eq!(theme_by_id("aurora").name, "Aurora");
    }

    #[test]
    fn test_unknown_theme_falls_back_to_classic() {
        assert_eq!(theme_by_id("neon").id, "classic");
        assert_eq!(theme_by_id("").id, "classic");
    }

    #[test]
    fn test_theme_ids_are_unique() {
        let mut ids: Vec<_> = THEMES.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), THEMES.len());
    }
}
