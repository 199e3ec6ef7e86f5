//! Test data builders and fixtures

use chrono::NaiveDate;
use cuponme::models::{CardPrice, Category, EntityId, EventCard, StoredSession};
use serde_json::{json, Value};

pub const METROPOLITANA: &str = "Región Metropolitana de Santiago";
pub const VALPARAISO: &str = "Región de Valparaíso";

/// Builder for event cards
#[derive(Debug, Clone)]
pub struct CardBuilder {
    card: EventCard,
}

impl CardBuilder {
    pub fn new(id: i64, title: &str) -> Self {
        Self {
            card: EventCard {
                id: EntityId::Number(id),
                title: title.to_string(),
                organizer: None,
                region: METROPOLITANA.to_string(),
                commune: "Santiago".to_string(),
                start: date(2025, 3, 1),
                end: None,
                price: None,
                image: None,
                tags: Vec::new(),
                category: None,
                description: None,
            },
        }
    }

    pub fn organizer(mut self, organizer: &str) -> Self {
        self.card.organizer = Some(organizer.to_string());
        self
    }

    pub fn located(mut self, region: &str, commune: &str) -> Self {
        self.card.region = region.to_string();
        self.card.commune = commune.to_string();
        self
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.card.price = Some(CardPrice::Amount(amount));
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.card.price = Some(CardPrice::Label(label.to_string()));
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.card.category = Some(category);
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.card.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn build(self) -> EventCard {
        self.card
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// `n` plain cards with ids 1..=n, all in Santiago at 5000 CLP
pub fn plain_cards(n: i64) -> Vec<EventCard> {
    (1..=n)
        .map(|i| CardBuilder::new(i, &format!("Evento {}", i)).amount(5000.0).build())
        .collect()
}

/// Fifteen cards covering every price shape, category and a few communes
pub fn fifteen_cards() -> Vec<EventCard> {
    vec![
        CardBuilder::new(1, "Festival Electrónico").category(Category::Party).amount(25000.0).tags(&["electro", "dj"]).build(),
        CardBuilder::new(2, "Maratón de Santiago").category(Category::Sport).label("Entrada liberada").build(),
        CardBuilder::new(3, "Concierto Sinfónico").category(Category::Concert).label("$12.000").located("", "Providencia").build(),
        CardBuilder::new(4, "Obra de teatro").category(Category::Theater).amount(8000.0).located("", "Ñuñoa").build(),
        CardBuilder::new(5, "Feria del libro").category(Category::Fair).label("Gratis").build(),
        CardBuilder::new(6, "Gala privada").category(Category::Party).label("Solo invitados").build(),
        CardBuilder::new(7, "Rock en Viña").category(Category::Concert).amount(30000.0).located(VALPARAISO, "Viña del Mar").build(),
        CardBuilder::new(8, "Trail Cerro San Cristóbal").category(Category::Sport).amount(15000.0).organizer("Club Andino").build(),
        CardBuilder::new(9, "Stand-up").amount(6000.0).build(),
        CardBuilder::new(10, "Feria gastronómica").category(Category::Fair).label("7000 CLP").located(VALPARAISO, "Valparaíso").build(),
        CardBuilder::new(11, "Jazz al parque").category(Category::Concert).label("free").located("", "Providencia").build(),
        CardBuilder::new(12, "Fiesta de fin de año").category(Category::Party).amount(40000.0).build(),
        CardBuilder::new(13, "Torneo de ajedrez").category(Category::Sport).amount(2000.0).build(),
        CardBuilder::new(14, "Teatro infantil").category(Category::Theater).amount(4000.0).located("", "Ñuñoa").build(),
        CardBuilder::new(15, "Encuentro de emprendedores").category(Category::Other).amount(0.0).build(),
    ]
}

/// A small region/commune dataset in the published GeoJSON shape
pub fn geo_collection_json() -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "NOM_REGION": METROPOLITANA, "NOM_COMUNA": "Providencia" }, "geometry": null },
            { "type": "Feature", "properties": { "NOM_REGION": METROPOLITANA, "NOM_COMUNA": "Ñuñoa" }, "geometry": null },
            { "type": "Feature", "properties": { "NOM_REGION": METROPOLITANA, "NOM_COMUNA": "Santiago" }, "geometry": null },
            { "type": "Feature", "properties": { "NOM_REGION": VALPARAISO, "NOM_COMUNA": "Viña del Mar" }, "geometry": null },
            { "type": "Feature", "properties": { "NOM_REGION": VALPARAISO, "NOM_COMUNA": "Valparaíso" }, "geometry": null }
        ]
    })
}

pub fn stored_session(role: &str, plan: Option<&str>) -> StoredSession {
    StoredSession {
        token: "tok-123".to_string(),
        full_name: "Ana Pérez".to_string(),
        role: role.to_string(),
        plan: plan.map(str::to_string),
        email: Some("ana@example.com".to_string()),
    }
}
