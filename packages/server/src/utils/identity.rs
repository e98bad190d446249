use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{administrator, event_admin, participant, supervisor};
use crate::error::AppError;

/// Accounts live in four separate tables, one per role. This module is the
/// single place that knows about all of them: credential lookups, id lookups
/// and the cross-table email uniqueness check all go through here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    EventAdmin,
    Participant,
    Supervisor,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::EventAdmin => "event_admin",
            Role::Participant => "participant",
            Role::Supervisor => "supervisor",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "super_admin" => Some(Role::SuperAdmin),
            "event_admin" => Some(Role::EventAdmin),
            "participant" => Some(Role::Participant),
            "supervisor" => Some(Role::Supervisor),
            _ => None,
        }
    }
}

/// A concrete account row, tagged with the table it came from.
#[derive(Clone, Debug)]
pub enum UserRecord {
    SuperAdmin(administrator::Model),
    EventAdmin(event_admin::Model),
    Participant(participant::Model),
    Supervisor(supervisor::Model),
}

impl UserRecord {
    pub fn id(&self) -> Uuid {
        match self {
            UserRecord::SuperAdmin(m) => m.id,
            UserRecord::EventAdmin(m) => m.id,
            UserRecord::Participant(m) => m.id,
            UserRecord::Supervisor(m) => m.id,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            UserRecord::SuperAdmin(m) => &m.email,
            UserRecord::EventAdmin(m) => &m.email,
            UserRecord::Participant(m) => &m.email,
            UserRecord::Supervisor(m) => &m.email,
        }
    }

    pub fn password(&self) -> &str {
        match self {
            UserRecord::SuperAdmin(m) => &m.password,
            UserRecord::EventAdmin(m) => &m.password,
            UserRecord::Participant(m) => &m.password,
            UserRecord::Supervisor(m) => &m.password,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            UserRecord::SuperAdmin(_) => Role::SuperAdmin,
            UserRecord::EventAdmin(_) => Role::EventAdmin,
            UserRecord::Participant(_) => Role::Participant,
            UserRecord::Supervisor(_) => Role::Supervisor,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            UserRecord::SuperAdmin(m) => format!("{} {}", m.name, m.last_name),
            UserRecord::EventAdmin(m) => format!("{} {}", m.name, m.last_name),
            UserRecord::Participant(m) => format!("{} {}", m.name, m.last_name),
            UserRecord::Supervisor(m) => format!("{} {}", m.name, m.last_name),
        }
    }
}

/// Probe every account table for an email, in a fixed order. At most one
/// table can match because emails are unique across all of them.
pub async fn find_by_email<C: ConnectionTrait>(
    db: &C,
    email: &str,
) -> Result<Option<UserRecord>, AppError> {
    if let Some(m) = administrator::Entity::find()
        .filter(administrator::Column::Email.eq(email))
        .one(db)
        .await?
    {
        return Ok(Some(UserRecord::SuperAdmin(m)));
    }
    if let Some(m) = event_admin::Entity::find()
        .filter(event_admin::Column::Email.eq(email))
        .one(db)
        .await?
    {
        return Ok(Some(UserRecord::EventAdmin(m)));
    }
    if let Some(m) = participant::Entity::find()
        .filter(participant::Column::Email.eq(email))
        .one(db)
        .await?
    {
        return Ok(Some(UserRecord::Participant(m)));
    }
    if let Some(m) = supervisor::Entity::find()
        .filter(supervisor::Column::Email.eq(email))
        .one(db)
        .await?
    {
        return Ok(Some(UserRecord::Supervisor(m)));
    }
    Ok(None)
}

/// Look up an account by id within the table its role names.
pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    role: Role,
    id: Uuid,
) -> Result<Option<UserRecord>, AppError> {
    Ok(match role {
        Role::SuperAdmin => administrator::Entity::find_by_id(id)
            .one(db)
            .await?
            .map(UserRecord::SuperAdmin),
        Role::EventAdmin => event_admin::Entity::find_by_id(id)
            .one(db)
            .await?
            .map(UserRecord::EventAdmin),
        Role::Participant => participant::Entity::find_by_id(id)
            .one(db)
            .await?
            .map(UserRecord::Participant),
        Role::Supervisor => supervisor::Entity::find_by_id(id)
            .one(db)
            .await?
            .map(UserRecord::Supervisor),
    })
}

/// Look up an account by id with no role hint, probing every table in the
/// same order as `find_by_email`. Ids are v4 UUIDs, so a cross-table clash
/// is not a practical concern.
pub async fn probe_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<UserRecord>, AppError> {
    for role in [
        Role::SuperAdmin,
        Role::EventAdmin,
        Role::Participant,
        Role::Supervisor,
    ] {
        if let Some(record) = find_by_id(db, role, id).await? {
            return Ok(Some(record));
        }
    }
    Ok(None)
}

/// Overwrite the stored password hash for an account, whichever table it
/// lives in.
pub async fn set_password<C: ConnectionTrait>(
    db: &C,
    record: &UserRecord,
    hashed: String,
) -> Result<(), AppError> {
    match record {
        UserRecord::SuperAdmin(m) => {
            let am = administrator::ActiveModel {
                id: Set(m.id),
                password: Set(hashed),
                ..Default::default()
            };
            am.update(db).await?;
        }
        UserRecord::EventAdmin(m) => {
            let am = event_admin::ActiveModel {
                id: Set(m.id),
                password: Set(hashed),
                ..Default::default()
            };
            am.update(db).await?;
        }
        UserRecord::Participant(m) => {
            let am = participant::ActiveModel {
                id: Set(m.id),
                password: Set(hashed),
                ..Default::default()
            };
            am.update(db).await?;
        }
        UserRecord::Supervisor(m) => {
            let am = supervisor::ActiveModel {
                id: Set(m.id),
                password: Set(hashed),
                ..Default::default()
            };
            am.update(db).await?;
        }
    }
    Ok(())
}

/// Reject an email already claimed by ANY account table. Per-table unique
/// indexes only cover their own table, so every create path calls this first.
pub async fn ensure_email_free<C: ConnectionTrait>(db: &C, email: &str) -> Result<(), AppError> {
    if find_by_email(db, email).await?.is_some() {
        return Err(AppError::EmailTaken);
    }
    Ok(())
}
