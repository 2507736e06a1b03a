//! Mascot persona configuration, chat history storage, and the static
//! accessory catalog.

use crate::errors::Result;
use crate::models::{
    Accessory, AccessorySlot, ChatMessage, MascotConfig, MascotTarget,
};
use crate::store::{self, keys};
use sea_orm::DatabaseConnection;
use std::sync::OnceLock;

/// Returns the persona configuration, defaulting to empty prompts and the
/// casual outfits before the admin customizes anything.
pub async fn get_mascot_config(db: &DatabaseConnection) -> Result<MascotConfig> {
    let stored: Option<MascotConfig> = store::read_value(db, keys::MASCOT_CONFIG).await?;
    Ok(stored.unwrap_or_else(|| MascotConfig {
        angel_prompt: String::new(),
        ebert_prompt: String::new(),
        angel_outfit: "CASUAL".to_string(),
        ebert_outfit: "CASUAL".to_string(),
    }))
}

/// Persists the persona configuration.
pub async fn save_mascot_config(db: &DatabaseConnection, config: &MascotConfig) -> Result<()> {
    store::write_value(db, keys::MASCOT_CONFIG, config).await
}

/// Returns the full chat transcript.
pub async fn get_chat_history(db: &DatabaseConnection) -> Result<Vec<ChatMessage>> {
    store::read_collection(db, keys::CHAT_HISTORY).await
}

/// Persists the chat transcript as a whole.
pub async fn save_chat_history(db: &DatabaseConnection, history: &[ChatMessage]) -> Result<()> {
    store::write_value(db, keys::CHAT_HISTORY, &history).await
}

/// Appends one message to the transcript.
pub async fn append_chat_message(
    db: &DatabaseConnection,
    message: ChatMessage,
) -> Result<Vec<ChatMessage>> {
    let mut history = get_chat_history(db).await?;
    history.push(message);
    save_chat_history(db, &history).await?;
    Ok(history)
}

/// The cosmetic items mascots can wear. Fixed catalog, never persisted.
pub fn accessory_catalog() -> &'static [Accessory] {
    static CATALOG: OnceLock<Vec<Accessory>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        let item = |id: &str, name: &str, price: i64, slot, mascot, icon: &str| Accessory {
            id: id.to_string(),
            name: name.to_string(),
            price,
            slot,
            mascot,
            icon: icon.to_string(),
        };
        use AccessorySlot::{Body, Face, Hand, Head};
        use MascotTarget::{Angel, Both, Ebert};
        vec![
            item("acc_cap_angel", "Gorra Sudomsur", 100, Head, Angel, "🧢"),
            item("acc_crown", "Corona Real", 500, Head, Both, "👑"),
            item("acc_party_hat", "Gorro Fiesta", 150, Head, Both, "🥳"),
            item("acc_headphones", "Audífonos Gamer", 400, Head, Both, "🎧"),
            item("acc_flower", "Flor Feliz", 80, Head, Ebert, "🌻"),
            item("acc_grad_cap", "Birrete", 300, Head, Both, "🎓"),
            item("acc_viking", "Casco Vikingo", 250, Head, Both, "🪖"),
            item("acc_glasses_angel", "Lentes Cool", 150, Face, Angel, "🕶️"),
            item("acc_glasses_star", "Lentes Estrella", 200, Face, Both, "🤩"),
            item("acc_pacifier_ebert", "Chupete Oro", 300, Face, Ebert, "👶"),
            item("acc_mustache", "Bigote Falso", 100, Face, Angel, "🥸"),
            item("acc_3dglasses", "Lentes 3D", 180, Face, Both, "👓"),
            item("acc_bowtie_angel", "Corbatín Rojo", 200, Body, Angel, "🎀"),
            item("acc_scarf", "Bufanda Escolar", 180, Body, Both, "🧣"),
            item("acc_bib_ebert", "Babero", 90, Body, Ebert, "🍼"),
            item("acc_backpack", "Mochila Totto", 350, Body, Angel, "🎒"),
            item("acc_cape", "Capa Héroe", 400, Body, Both, "🦸"),
            item("acc_medal", "Medalla Honor", 250, Body, Both, "🥇"),
            item("acc_brush_ebert", "Pincel Artista", 120, Hand, Ebert, "🖌️"),
            item("acc_guitar", "Guitarra", 600, Hand, Angel, "🎸"),
            item("acc_lollipop", "Paleta", 50, Hand, Both, "🍭"),
            item("acc_pencil", "Lápiz Gigante", 80, Hand, Angel, "✏️"),
            item("acc_book", "Libro", 100, Hand, Both, "📖"),
            item("acc_flag", "Bandera RD", 150, Hand, Both, "🇩🇴"),
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MascotKind;
    use crate::test_utils::setup_test_db;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_mascot_config_defaults_then_roundtrips() -> Result<()> {
        let db = setup_test_db().await?;

        let config = get_mascot_config(&db).await?;
        assert_eq!(config.angel_outfit, "CASUAL");
        assert!(config.angel_prompt.is_empty());

        let custom = MascotConfig {
            angel_prompt: "Eres Angel, siempre positivo".to_string(),
            ebert_prompt: "Eres Ebert, un bebé curioso".to_string(),
            angel_outfit: "FORMAL".to_string(),
            ebert_outfit: "CASUAL".to_string(),
        };
        save_mascot_config(&db, &custom).await?;
        assert_eq!(get_mascot_config(&db).await?, custom);
        Ok(())
    }

    #[tokio::test]
    async fn test_chat_history_appends_in_order() -> Result<()> {
        let db = setup_test_db().await?;

        let message = |id: &str, sender, text: &str| ChatMessage {
            id: id.to_string(),
            sender,
            text: text.to_string(),
            timestamp: 0,
        };
        append_chat_message(&db, message("m1", None, "hola")).await?;
        let history =
            append_chat_message(&db, message("m2", Some(MascotKind::Angel), "¡Hola!")).await?;

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].sender, None);
        assert_eq!(history[1].sender, Some(MascotKind::Angel));
        Ok(())
    }

    #[test]
    fn test_catalog_ids_unique_and_slots_covered() {
        let catalog = accessory_catalog();
        let ids: HashSet<&str> = catalog.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.len());

        for slot in [
            AccessorySlot::Head,
            AccessorySlot::Face,
            AccessorySlot::Body,
            AccessorySlot::Hand,
        ] {
            assert!(catalog.iter().any(|a| a.slot == slot));
        }
    }
}
