mod acl;
pub use acl::AccessControlTable;
mod annotation;
pub use annotation::{AnnotationId, AnnotationKind, AnnotationReply, DocumentAnnotation, ReplyId};
mod document;
pub use document::SharedDocument;
mod document_id;
pub use document_id::{DocumentId, InvalidDocumentId};
mod event_bus;
pub use event_bus::EventBus;
mod events;
pub use events::{DocumentUpdate, SessionUpdate};
mod operation;
pub use operation::{EditKind, EditOperation};
mod registry;
pub use registry::{LeaveOutcome, SessionRegistry};
mod replica;
pub use replica::ReplicatedDocument;
mod role;
pub use role::Role;
mod session;
pub use session::{CollaborationSession, SessionStatus};
mod session_id;
pub use session_id::{InvalidSessionId, SessionId};
mod storage_key;
pub use storage_key::StorageKey;
mod store;
pub use store::DocumentStore;
mod unix_timestamp;
pub use unix_timestamp::UnixTimestamp;
mod user;
pub use user::CollaborationUser;
mod user_id;
pub use user_id::UserId;
mod workspace;
pub use workspace::{CreateDocumentError, Workspace};
