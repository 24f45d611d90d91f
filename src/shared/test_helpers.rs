use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    middleware::{from_fn_with_state, Next},
    response::Response,
    Router,
};
use chrono::{DateTime, Duration, Utc};
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::Fake;
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::countries::models::Country;
use crate::features::countries::repository::CountryRepository;
use crate::features::diaries::dtos::CreateDiaryDto;
use crate::features::diaries::models::{Diary, DiaryChanges, NewDiary, Relocation, Removal};
use crate::features::diaries::repository::DiaryRepository;
use crate::features::geocoding::CountryResolver;
use crate::features::visited_countries::models::{next_count, LedgerOp, VisitedCountryDetail};
use crate::features::visited_countries::repository::VisitedCountryRepository;

const DEFAULT_COUNTRIES: &[(&str, &str, Option<&str>)] = &[
    ("JP", "Japan", Some("日本")),
    ("KR", "South Korea", Some("대한민국")),
    ("CN", "China", Some("中国")),
    ("TH", "Thailand", Some("ประเทศไทย")),
    ("VN", "Vietnam", Some("Việt Nam")),
    ("US", "United States", None),
    ("GB", "United Kingdom", None),
    ("FR", "France", Some("France")),
    ("DE", "Germany", Some("Deutschland")),
    ("IT", "Italy", Some("Italia")),
    ("ES", "Spain", Some("España")),
    ("AU", "Australia", None),
];

#[derive(Debug, Clone)]
struct LedgerRow {
    diary_count: i32,
    last_verified_at: DateTime<Utc>,
}

#[derive(Default)]
struct StoreState {
    countries: Vec<Country>,
    diaries: Vec<Diary>,
    ledger: HashMap<(String, i32), LedgerRow>,
}

impl StoreState {
    fn apply(&mut self, user_id: &str, country_id: i32, op: LedgerOp) {
        let key = (user_id.to_string(), country_id);
        let current = self.ledger.get(&key).map(|row| row.diary_count);

        match (next_count(current, op), self.ledger.get_mut(&key)) {
            (Some(diary_count), Some(row)) => row.diary_count = diary_count,
            (Some(diary_count), None) => {
                self.ledger.insert(
                    key,
                    LedgerRow {
                        diary_count,
                        last_verified_at: Utc::now(),
                    },
                );
            }
            (None, _) => {
                self.ledger.remove(&key);
            }
        }
    }
}

/// In-memory stand-in for the diary, country and ledger tables.
///
/// Every method runs under one lock, so each mutation is atomic the way a
/// database transaction would be.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    pub fn with_default_countries() -> Self {
        let countries = DEFAULT_COUNTRIES
            .iter()
            .zip(1..)
            .map(|(&(code, name, native_name), id)| Country {
                id,
                code: code.to_string(),
                name: name.to_string(),
                native_name: native_name.map(str::to_string),
                boundary_ref: Some(format!("geo/countries/{}.geojson", code.to_lowercase())),
            })
            .collect();

        Self {
            state: Mutex::new(StoreState {
                countries,
                ..Default::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap()
    }

    pub fn country_by_code(&self, code: &str) -> Option<Country> {
        self.lock()
            .countries
            .iter()
            .find(|c| c.code == code)
            .cloned()
    }

    /// Ledger count for (user, country code); `None` when the row is absent
    pub fn diary_count(&self, user_id: &str, code: &str) -> Option<i32> {
        let country = self.country_by_code(code)?;
        self.lock()
            .ledger
            .get(&(user_id.to_string(), country.id))
            .map(|row| row.diary_count)
    }

    /// Number of ledger rows held by the user
    pub fn ledger_len(&self, user_id: &str) -> usize {
        self.lock()
            .ledger
            .keys()
            .filter(|(user, _)| user == user_id)
            .count()
    }

    /// Overwrite an entry's coordinate without touching the ledger
    pub fn move_diary(&self, id: Uuid, latitude: f64, longitude: f64) {
        let mut state = self.lock();
        if let Some(diary) = state.diaries.iter_mut().find(|d| d.id == id) {
            diary.latitude = latitude;
            diary.longitude = longitude;
        }
    }
}

#[async_trait]
impl CountryRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Country>> {
        let mut countries = self.lock().countries.clone();
        countries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(countries)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Country>> {
        Ok(self.country_by_code(code))
    }
}

#[async_trait]
impl DiaryRepository for InMemoryStore {
    async fn create(&self, diary: NewDiary, country_id: Option<i32>) -> Result<Diary> {
        let now = Utc::now();
        let created = Diary {
            id: Uuid::new_v4(),
            user_id: diary.user_id,
            latitude: diary.latitude,
            longitude: diary.longitude,
            title: diary.title,
            content: diary.content,
            visited_at: diary.visited_at,
            created_at: now,
            updated_at: now,
        };

        let mut state = self.lock();
        state.diaries.push(created.clone());
        if let Some(country_id) = country_id {
            state.apply(&created.user_id, country_id, LedgerOp::Increment);
        }
        Ok(created)
    }

    async fn find_by_id(&self, user_id: &str, id: Uuid) -> Result<Option<Diary>> {
        Ok(self
            .lock()
            .diaries
            .iter()
            .find(|d| d.id == id && d.user_id == user_id)
            .cloned())
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Diary>> {
        let mut diaries: Vec<_> = self
            .lock()
            .diaries
            .iter()
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect();
        diaries.sort_by(|a, b| {
            b.visited_at
                .cmp(&a.visited_at)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(diaries)
    }

    async fn update(
        &self,
        user_id: &str,
        id: Uuid,
        changes: DiaryChanges,
        relocation: Option<Relocation>,
    ) -> Result<Option<Diary>> {
        let mut state = self.lock();

        let Some(diary) = state
            .diaries
            .iter_mut()
            .find(|d| d.id == id && d.user_id == user_id)
        else {
            return Ok(None);
        };

        if let Some(r) = relocation {
            if diary.latitude != r.expected_latitude || diary.longitude != r.expected_longitude {
                return Ok(None);
            }
        }

        if let Some(latitude) = changes.latitude {
            diary.latitude = latitude;
        }
        if let Some(longitude) = changes.longitude {
            diary.longitude = longitude;
        }
        if let Some(title) = changes.title {
            diary.title = title;
        }
        if let Some(content) = changes.content {
            diary.content = content;
        }
        if let Some(visited_at) = changes.visited_at {
            diary.visited_at = visited_at;
        }
        diary.updated_at = Utc::now();
        let updated = diary.clone();

        if let Some(r) = relocation.filter(Relocation::changes_country) {
            if let Some(from) = r.from_country_id {
                state.apply(user_id, from, LedgerOp::Decrement);
            }
            if let Some(to) = r.to_country_id {
                state.apply(user_id, to, LedgerOp::Increment);
            }
        }

        Ok(Some(updated))
    }

    async fn delete(&self, user_id: &str, id: Uuid, removal: Removal) -> Result<bool> {
        let mut state = self.lock();

        let before = state.diaries.len();
        state.diaries.retain(|d| {
            !(d.id == id
                && d.user_id == user_id
                && d.latitude == removal.expected_latitude
                && d.longitude == removal.expected_longitude)
        });
        if state.diaries.len() == before {
            return Ok(false);
        }

        if let Some(country_id) = removal.country_id {
            state.apply(user_id, country_id, LedgerOp::Decrement);
        }
        Ok(true)
    }
}

#[async_trait]
impl VisitedCountryRepository for InMemoryStore {
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<VisitedCountryDetail>> {
        let state = self.lock();
        let mut rows: Vec<_> = state
            .ledger
            .iter()
            .filter(|((user, _), _)| user == user_id)
            .filter_map(|((_, country_id), row)| {
                let country = state.countries.iter().find(|c| c.id == *country_id)?;
                Some(VisitedCountryDetail {
                    country_id: country.id,
                    code: country.code.clone(),
                    name: country.name.clone(),
                    native_name: country.native_name.clone(),
                    boundary_ref: country.boundary_ref.clone(),
                    diary_count: row.diary_count,
                    last_verified_at: row.last_verified_at,
                })
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn codes_by_user(&self, user_id: &str) -> Result<Vec<String>> {
        let mut codes: Vec<_> = VisitedCountryRepository::list_by_user(self, user_id)
            .await?
            .into_iter()
            .map(|row| row.code)
            .collect();
        codes.sort();
        Ok(codes)
    }
}

/// Resolver answering from a fixed coordinate table; anything else is unresolved
pub struct StubResolver {
    store: Arc<InMemoryStore>,
    routes: Vec<((f64, f64), &'static str)>,
    calls: AtomicUsize,
}

impl StubResolver {
    pub fn new(store: &Arc<InMemoryStore>) -> Self {
        Self {
            store: Arc::clone(store),
            routes: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn route(mut self, coordinate: (f64, f64), code: &'static str) -> Self {
        self.routes.push((coordinate, code));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CountryResolver for StubResolver {
    async fn resolve(&self, latitude: f64, longitude: f64) -> Option<Country> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (_, code) = self
            .routes
            .iter()
            .find(|(coordinate, _)| *coordinate == (latitude, longitude))?;
        self.store.country_by_code(code)
    }
}

/// A valid create request at the given coordinate with random text
pub fn create_dto((latitude, longitude): (f64, f64)) -> CreateDiaryDto {
    CreateDiaryDto {
        latitude,
        longitude,
        title: Sentence(2..6).fake(),
        content: Paragraph(1..3).fake(),
        visited_at: Utc::now() - Duration::days((1..365).fake::<i64>()),
    }
}

/// Sign arbitrary claims with HS256
pub fn sign_claims(secret: &str, claims: serde_json::Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

/// Sign a token for `sub` that expires in an hour
pub fn sign_token(secret: &str, sub: &str) -> String {
    let exp = Utc::now().timestamp() + 3600;
    sign_claims(secret, serde_json::json!({ "sub": sub, "exp": exp }))
}

async fn inject_user(State(sub): State<String>, mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(AuthenticatedUser { sub });
    next.run(request).await
}

/// Wrap `router` so every request is authenticated as `sub`
pub fn with_test_user(router: Router, sub: &str) -> Router {
    router.layer(from_fn_with_state(sub.to_string(), inject_user))
}
