//! Demo notes API backed by an in-memory store.
//!
//! ```text
//! GET    /api/notes[?sort=title:asc,createdAt:desc]
//! GET    /api/notes/{id}
//! POST   /api/notes
//! DELETE /api/notes/{id}
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use actix_web::web;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use minimal_api::domain::{Error, Outcome};
use minimal_api::inbound::http::validation::parse_date_time;
use minimal_api::inbound::http::{
    Projection, ResponseModel, RouteGroup, RouteGroupName, RouteGroupNameError, Validate,
    ValidatedJson, Validator, is_valid_email, project, project_as, project_each,
};
use minimal_api::scalar_content;

const SORTABLE: [&str; 4] = ["id", "title", "due", "createdAt"];

/// Stored note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    id: u64,
    title: String,
    author_email: Option<String>,
    due: Option<NaiveDateTime>,
    created_at: DateTime<Utc>,
}

scalar_content!(Note);

/// Wire representation of a [`Note`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    id: u64,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    author_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due: Option<NaiveDateTime>,
    created_at: DateTime<Utc>,
}

impl ResponseModel<Note> for NoteResponse {
    fn from_dto(dto: Note) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            author_email: dto.author_email,
            due: dto.due,
            created_at: dto.created_at,
        }
    }
}

/// Body of `POST /api/notes`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    title: Option<String>,
    author_email: Option<String>,
    due: Option<String>,
}

impl Validate for NewNote {
    fn validate(&self, validator: &mut Validator) {
        validator.not_null_not_empty("Title", self.title.as_deref());
        if let Some(due) = &self.due {
            validator.date_time("Due", due);
        }
        let bad_email = self
            .author_email
            .as_deref()
            .is_some_and(|email| !is_valid_email(email));
        if bad_email {
            validator.add_failure(
                Some("AuthorEmail"),
                "Property 'AuthorEmail' must be a valid email address",
            );
        }
    }
}

/// Query string of `GET /api/notes`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    sort: Option<String>,
}

impl ListQuery {
    /// Parse `key[:asc|:desc]` pairs; ascending unless `desc` is given.
    fn sorts(&self) -> Vec<(String, bool)> {
        self.sort
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| match part.split_once(':') {
                Some((key, direction)) => {
                    (key.to_owned(), !direction.eq_ignore_ascii_case("desc"))
                }
                None => (part.to_owned(), true),
            })
            .collect()
    }
}

#[derive(Debug, Default)]
struct NoteBook {
    next_id: u64,
    notes: BTreeMap<u64, Note>,
}

/// In-memory note storage shared by the handlers.
#[derive(Debug, Default)]
pub struct NoteStore {
    inner: Mutex<NoteBook>,
}

impl NoteStore {
    fn book(&self) -> MutexGuard<'_, NoteBook> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn insert(
        &self,
        title: String,
        author_email: Option<String>,
        due: Option<NaiveDateTime>,
    ) -> Note {
        let mut book = self.book();
        book.next_id += 1;
        let note = Note {
            id: book.next_id,
            title,
            author_email,
            due,
            created_at: Utc::now(),
        };
        book.notes.insert(note.id, note.clone());
        note
    }

    fn get(&self, id: u64) -> Result<Note, Error> {
        self.book()
            .notes
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("note {id} does not exist")))
    }

    fn remove(&self, id: u64) -> Result<Note, Error> {
        self.book()
            .notes
            .remove(&id)
            .ok_or_else(|| Error::not_found(format!("note {id} does not exist")))
    }

    fn list(&self) -> Vec<Note> {
        self.book().notes.values().cloned().collect()
    }
}

fn sort_notes(notes: &mut [Note], sorts: &[(String, bool)]) {
    notes.sort_by(|left, right| {
        sorts
            .iter()
            .map(|(key, ascending)| {
                let ordering = match key.to_ascii_lowercase().as_str() {
                    "title" => left.title.cmp(&right.title),
                    "due" => left.due.cmp(&right.due),
                    "createdat" => left.created_at.cmp(&right.created_at),
                    _ => left.id.cmp(&right.id),
                };
                if *ascending { ordering } else { ordering.reverse() }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| left.id.cmp(&right.id))
    });
}

async fn list_notes(
    store: web::Data<NoteStore>,
    query: web::Query<ListQuery>,
) -> Projection<Vec<NoteResponse>> {
    let sorts = query.sorts();
    let mut validator = Validator::new();
    validator.sort_by(&sorts, &SORTABLE, "Note");
    let outcome = match validator.finish() {
        Ok(()) => {
            let mut notes = store.list();
            sort_notes(&mut notes, &sorts);
            Outcome::success(notes)
        }
        Err(error) => Outcome::failure(error),
    };
    project_each(outcome)
}

async fn get_note(store: web::Data<NoteStore>, id: web::Path<u64>) -> Projection<NoteResponse> {
    project_as(Outcome::from(store.get(id.into_inner())))
}

async fn create_note(
    store: web::Data<NoteStore>,
    body: ValidatedJson<NewNote>,
) -> Projection<NoteResponse> {
    let NewNote {
        title,
        author_email,
        due,
    } = body.into_inner();
    let note = store.insert(
        title.unwrap_or_default(),
        author_email,
        due.as_deref().and_then(parse_date_time),
    );
    info!(note_id = note.id, "note created");
    let location = format!("/api/notes/{}", note.id);
    match Outcome::created(note) {
        Ok(outcome) => project_as(outcome).with_location(location),
        Err(error) => project(Outcome::failure(Error::domain(error.to_string()))),
    }
}

async fn delete_note(store: web::Data<NoteStore>, id: web::Path<u64>) -> Projection<()> {
    let outcome = match store.remove(id.into_inner()) {
        Ok(note) => {
            info!(note_id = note.id, "note deleted");
            Outcome::no_content()
        }
        Err(error) => Outcome::failure(error),
    };
    project(outcome)
}

/// Route group serving `/api/notes`.
pub struct NotesRoutes {
    name: RouteGroupName,
    store: web::Data<NoteStore>,
}

impl NotesRoutes {
    /// Build the group around `store`.
    ///
    /// # Errors
    ///
    /// Propagates [`RouteGroupNameError`] if the group name is rejected.
    pub fn new(store: Arc<NoteStore>) -> Result<Self, RouteGroupNameError> {
        Ok(Self {
            name: RouteGroupName::new("notes")?,
            store: web::Data::from(store),
        })
    }
}

impl RouteGroup for NotesRoutes {
    fn name(&self) -> &RouteGroupName {
        &self.name
    }

    fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.store.clone())
            .route("", web::get().to(list_notes))
            .route("", web::post().to(create_note))
            .route("/{id}", web::get().to(get_note))
            .route("/{id}", web::delete().to(delete_note));
    }
}
