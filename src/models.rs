use serde::{Deserialize, Serialize};

/// A single card record from the pokemontcg.io v2 API.
/// Unknown fields in the response are ignored.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub supertype: Option<String>,
    #[serde(default)]
    pub subtypes: Vec<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(rename = "set", default)]
    pub set_info: Option<SetInfo>,
    #[serde(rename = "images", default)]
    pub image_info: Option<ImageInfo>,
    #[serde(rename = "nationalPokedexNumbers", default)]
    pub national_pokedex_numbers: Vec<u32>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SetInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub series: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ImageInfo {
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

impl Card {
    /// Small image URL, used in result lists
    pub fn small_image_url(&self) -> Option<&str> {
        self.image_info.as_ref().and_then(|i| i.small.as_deref())
    }

    /// Large image URL for the detail view, falling back to small
    pub fn large_image_url(&self) -> Option<&str> {
        self.image_info
            .as_ref()
            .and_then(|i| i.large.as_deref().or(i.small.as_deref()))
    }

    /// "Set Name · 123" style caption for list rows
    pub fn set_caption(&self) -> String {
        let set_name = self
            .set_info
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or("Unknown set");
        match self.number.as_deref() {
            Some(n) => format!("{} · {}", set_name, n),
            None => set_name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_card_json() {
        let json = serde_json::json!({
            "id": "sv1-1",
            "name": "Pineco",
            "supertype": "Pokémon",
            "subtypes": ["Basic"],
            "types": ["Grass"],
            "number": "1",
            "rarity": "Common",
            "set": { "id": "sv1", "name": "Scarlet & Violet", "series": "Scarlet & Violet" },
            "images": {
                "small": "https://images.pokemontcg.io/sv1/1.png",
                "large": "https://images.pokemontcg.io/sv1/1_hires.png"
            },
            "nationalPokedexNumbers": [204],
            "hp": "60",
            "artist": "Kouki Saitou"
        });

        let card: Card = serde_json::from_value(json).unwrap();
        assert_eq!(card.id, "sv1-1");
        assert_eq!(card.name, "Pineco");
        assert_eq!(card.types, vec!["Grass"]);
        assert_eq!(card.set_info.as_ref().unwrap().id, "sv1");
        assert_eq!(card.national_pokedex_numbers, vec![204]);
        assert_eq!(
            card.small_image_url(),
            Some("https://images.pokemontcg.io/sv1/1.png")
        );
    }

    #[test]
    fn parses_minimal_card_json() {
        let json = serde_json::json!({ "id": "xy1-1", "name": "Venusaur-EX" });
        let card: Card = serde_json::from_value(json).unwrap();
        assert_eq!(card.id, "xy1-1");
        assert!(card.set_info.is_none());
        assert!(card.small_image_url().is_none());
        assert!(card.large_image_url().is_none());
        assert_eq!(card.set_caption(), "Unknown set");
    }

    #[test]
    fn large_image_falls_back_to_small() {
        let card = Card {
            id: "a-1".into(),
            name: "A".into(),
            supertype: None,
            subtypes: vec![],
            types: vec![],
            number: Some("1".into()),
            rarity: None,
            set_info: Some(SetInfo {
                id: "a".into(),
                name: "Alpha".into(),
                series: None,
            }),
            image_info: Some(ImageInfo {
                small: Some("small.png".into()),
                large: None,
            }),
            national_pokedex_numbers: vec![],
        };
        assert_eq!(card.large_image_url(), Some("small.png"));
        assert_eq!(card.set_caption(), "Alpha · 1");
    }
}
