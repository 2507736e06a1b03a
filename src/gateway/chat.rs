//! Fatigue-gated persona chat with the two mascots.

use super::api_types::{ContentPart, GenerateRequest};
use super::AiGateway;
use crate::core::usage;
use crate::errors::Result;
use crate::models::{CartItem, MascotKind, Product, UserProfile};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use tracing::{error, instrument};

/// Everything the mascot is allowed to know about the session.
#[derive(Debug, Clone, Default)]
pub struct ChatContext {
    pub products: Vec<Product>,
    pub profile: Option<UserProfile>,
    pub cart: Vec<CartItem>,
}

impl AiGateway {
    /// One chat turn with a mascot.
    ///
    /// When today's AI quota is exhausted the remote is never contacted and
    /// the mascot answers with its canned tired line. A successful remote
    /// call counts exactly once against the quota; a failed one counts
    /// nothing and degrades to a busy line.
    #[instrument(skip(self, db, message, context))]
    pub async fn chat(
        &self,
        db: &DatabaseConnection,
        mascot: MascotKind,
        message: &str,
        context: &ChatContext,
        today: NaiveDate,
        hour: u32,
        daily_limit: u32,
    ) -> Result<String> {
        if usage::is_exhausted(db, today, daily_limit).await? {
            return Ok(tired_reply(mascot).to_string());
        }

        let request = GenerateRequest {
            model: self.config().text_model.clone(),
            contents: vec![ContentPart::text(message)],
            system_instruction: Some(system_instruction(mascot, context, hour)),
            temperature: Some(self.config().temperature),
            max_output_tokens: Some(self.config().max_tokens),
        };

        match self.generate(&request).await {
            Ok(response) => {
                usage::record_call(db, today, daily_limit).await?;
                Ok(response
                    .into_text()
                    .unwrap_or_else(|| default_greeting(mascot).to_string()))
            }
            Err(e) => {
                error!("Mascot chat failed: {e}");
                Ok("Dame un segundo, estoy acomodando unos cuadernos...".to_string())
            }
        }
    }
}

/// The canned reply used while the daily quota is spent.
#[must_use]
pub fn tired_reply(mascot: MascotKind) -> &'static str {
    match mascot {
        MascotKind::Angel => {
            "(Angel bosteza) Estoy muy cansado hoy... déjame dormir un rato... Zzz..."
        }
        MascotKind::Ebert => "Zzz... (Ebert está dormido)",
    }
}

fn default_greeting(mascot: MascotKind) -> &'static str {
    match mascot {
        MascotKind::Angel => "¡Hola! ¿En qué te ayudo?",
        MascotKind::Ebert => "¡Hola! 🎨",
    }
}

/// Coarse day phase fed to the persona prompt.
#[must_use]
pub fn time_phase(hour: u32) -> &'static str {
    if hour < 6 {
        "MADRUGADA (Muy tarde)"
    } else if hour < 18 {
        "DÍA"
    } else {
        "NOCHE"
    }
}

fn system_instruction(mascot: MascotKind, context: &ChatContext, hour: u32) -> String {
    let user_name = context
        .profile
        .as_ref()
        .map_or("Amigo", |p| p.name.as_str());
    let user_level = context
        .profile
        .as_ref()
        .map_or("Novato", |p| p.level.label());
    let phase = time_phase(hour);

    // Cap the inventory excerpt to keep the prompt small
    let product_sample = context
        .products
        .iter()
        .take(50)
        .map(|p| format!("{} (${})", p.name, p.price))
        .collect::<Vec<_>>()
        .join(", ");
    let cart_summary = if context.cart.is_empty() {
        "Carrito vacío".to_string()
    } else {
        context
            .cart
            .iter()
            .map(|i| format!("{}x {}", i.quantity, i.product.name))
            .collect::<Vec<_>>()
            .join(", ")
    };

    match mascot {
        MascotKind::Ebert => format!(
            "Eres Ebert, la mascota bebé (1.5 años) de Sudomsur.\n\
             PERSONALIDAD: Niño muy pequeño, tierno, curioso. NO dices \"gugú\" siempre, \
             hablas con palabras simples.\n\
             CONTEXTO ACTUAL: Usuario {user_name}, FASE DEL DÍA: {phase}.\n\
             SI ES DE NOCHE O MADRUGADA: Di que tienes sueño o bostezas.\n\
             OBJETIVO: Ser adorable y motivar a volver. Si el carrito está vacío, ponte triste.\n\
             RESPUESTA: Máximo 20 palabras. Usa emojis."
        ),
        MascotKind::Angel => format!(
            "Eres Angel (3 años), el Gerente Junior de Sudomsur.\n\
             PERSONALIDAD: Educado, servicial, profesional pero niño. Estilo Duolingo.\n\
             CONOCIMIENTO: Sabes todo del inventario: {product_sample}.\n\
             CONTEXTO ACTUAL: Usuario {user_name} ({user_level}). Carrito: {cart_summary}. \
             FASE DEL DÍA: {phase}.\n\
             SI ES DE MADRUGADA: Susurra (usa paréntesis o minúsculas) y pregunta si están \
             estudiando tarde, ofrece café.\n\
             SI ES DE NOCHE: Menciona que ya casi cierran pero pueden pedir online.\n\
             OBJETIVO: Ayudar a comprar, sugerir complementos (Cross-selling).\n\
             RESPUESTA: Máximo 40 palabras."
        ),
    }
}
