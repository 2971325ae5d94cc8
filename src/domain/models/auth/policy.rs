//! # 접근 정책 테이블
//!
//! 모든 `{리소스, 작업}` 조합의 권한 규칙을 한 곳에 선언합니다.
//!
//! ```text
//! 요청 ─▶ AuthMiddleware ─▶ authorize()        (인증 여부 + 역할)
//!                              │
//!         Service ────────────▶ enforce()      (역할 + 소유권)
//! ```
//!
//! 인증 미들웨어는 [`authorize`]로 역할 게이트를 평가하고, 서비스는 대상 레코드를 읽은 뒤
//! [`enforce`]로 같은 테이블의 소유권 규칙을 평가합니다. 규칙을 바꾸려면 [`POLICIES`]만
//! 수정하면 됩니다.
//!
//! | 리소스 | Create | List/Read | Update/Delete | 기타 |
//! |--------|--------|-----------|---------------|------|
//! | City, Branch, Status, Source | admin | 공개 | admin + 생성자 | |
//! | Integration | admin | 공개 | admin | |
//! | Candidate | admin, recruiter | 담당자 또는 admin | 생성자 또는 admin | Reassign: admin |
//! | User | admin | 인증 사용자 | admin | |
//! | Profile, Session | | 인증 사용자 | | |

use std::fmt;
use mongodb::bson::oid::ObjectId;
use serde::Serialize;
use crate::core::{AppError, AppResult};
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::domain::models::auth::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Profile,
    Session,
    User,
    City,
    Branch,
    Status,
    Source,
    Integration,
    Candidate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    List,
    Read,
    Update,
    Delete,
    Reassign,
}

/// 신원(토큰) 요구 여부
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
}

/// 레코드 단위 소유권 규칙
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    Unrestricted,
    /// `createdBy == 요청자` (관리자도 예외 없음)
    Creator,
    /// `createdBy == 요청자` 또는 관리자
    CreatorOrAdmin,
    /// `assignedTo == 요청자` 또는 관리자
    AssigneeOrAdmin,
}

impl Ownership {
    /// 레코드를 보지 않고도 통과하는지 여부 (목록 필터링에 사용)
    pub fn bypassed_by(&self, actor: &AuthenticatedUser) -> bool {
        match self {
            Ownership::Unrestricted => true,
            Ownership::Creator => false,
            Ownership::CreatorOrAdmin | Ownership::AssigneeOrAdmin => actor.is_admin(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub access: Access,
    /// 비어 있으면 역할 제한 없음
    pub roles: &'static [Role],
    pub ownership: Ownership,
}

const ADMIN: &[Role] = &[Role::Admin];
const STAFF: &[Role] = &[Role::Admin, Role::Recruiter];
const ANY: &[Role] = &[];

const PUBLIC: Policy = Policy { access: Access::Public, roles: ANY, ownership: Ownership::Unrestricted };
const SIGNED_IN: Policy = Policy { access: Access::Authenticated, roles: ANY, ownership: Ownership::Unrestricted };
const ADMIN_ONLY: Policy = Policy { access: Access::Authenticated, roles: ADMIN, ownership: Ownership::Unrestricted };
const ADMIN_CREATOR: Policy = Policy { access: Access::Authenticated, roles: ADMIN, ownership: Ownership::Creator };

/// 선언되지 않은 조합에 적용되는 기본 규칙 (가장 엄격)
const FALLBACK: Policy = ADMIN_CREATOR;

use Operation::*;
use Resource::*;

pub static POLICIES: &[(Resource, Operation, Policy)] = &[
    (Profile, Read, SIGNED_IN),
    (Session, List, SIGNED_IN),
    (User, Create, ADMIN_ONLY),
    (User, List, SIGNED_IN),
    (User, Read, SIGNED_IN),
    (User, Update, ADMIN_ONLY),
    (User, Delete, ADMIN_ONLY),
    (City, Create, ADMIN_ONLY),
    (City, List, PUBLIC),
    (City, Read, PUBLIC),
    (City, Update, ADMIN_CREATOR),
    (City, Delete, ADMIN_CREATOR),
    (Branch, Create, ADMIN_ONLY),
    (Branch, List, PUBLIC),
    (Branch, Read, PUBLIC),
    (Branch, Update, ADMIN_CREATOR),
    (Branch, Delete, ADMIN_CREATOR),
    (Status, Create, ADMIN_ONLY),
    (Status, List, PUBLIC),
    (Status, Read, PUBLIC),
    (Status, Update, ADMIN_CREATOR),
    (Status, Delete, ADMIN_CREATOR),
    (Source, Create, ADMIN_ONLY),
    (Source, List, PUBLIC),
    (Source, Read, PUBLIC),
    (Source, Update, ADMIN_CREATOR),
    (Source, Delete, ADMIN_CREATOR),
    (Integration, Create, ADMIN_ONLY),
    (Integration, List, PUBLIC),
    (Integration, Read, PUBLIC),
    (Integration, Update, ADMIN_ONLY),
    (Integration, Delete, ADMIN_ONLY),
    (Candidate, Create, Policy { access: Access::Authenticated, roles: STAFF, ownership: Ownership::Unrestricted }),
    (Candidate, List, Policy { access: Access::Authenticated, roles: STAFF, ownership: Ownership::AssigneeOrAdmin }),
    (Candidate, Read, Policy { access: Access::Authenticated, roles: STAFF, ownership: Ownership::AssigneeOrAdmin }),
    (Candidate, Update, Policy { access: Access::Authenticated, roles: STAFF, ownership: Ownership::CreatorOrAdmin }),
    (Candidate, Delete, Policy { access: Access::Authenticated, roles: STAFF, ownership: Ownership::CreatorOrAdmin }),
    (Candidate, Reassign, ADMIN_ONLY),
];

/// `{리소스, 작업}`에 선언된 정책을 찾습니다. 없으면 가장 엄격한 규칙을 돌려줍니다.
pub fn policy_for(resource: Resource, operation: Operation) -> Policy {
    POLICIES
        .iter()
        .find(|(r, o, _)| *r == resource && *o == operation)
        .map(|(_, _, policy)| *policy)
        .unwrap_or(FALLBACK)
}

/// 소유권 평가 대상 레코드의 참조 정보
#[derive(Debug, Clone, Copy, Default)]
pub struct Owner<'a> {
    pub created_by: Option<&'a ObjectId>,
    pub assigned_to: Option<&'a ObjectId>,
}

impl<'a> Owner<'a> {
    pub fn created_by(created_by: &'a ObjectId) -> Self {
        Self { created_by: Some(created_by), assigned_to: None }
    }
}

/// 역할 게이트
///
/// 1. 역할 집합이 비어 있고 공개 작업이면 통과
/// 2. 신원이 없으면 `AuthenticationError` (401)
/// 3. 역할이 집합에 없으면 `AuthorizationError` (403)
pub fn authorize(policy: &Policy, identity: Option<&AuthenticatedUser>) -> AppResult<()> {
    if policy.access == Access::Public && policy.roles.is_empty() {
        return Ok(());
    }

    let identity = identity
        .ok_or_else(|| AppError::AuthenticationError("인증이 필요합니다".to_string()))?;

    if policy.roles.is_empty() || identity.has_any_role(policy.roles) {
        return Ok(());
    }

    Err(AppError::AuthorizationError(format!(
        "접근 거부: 다음 역할 중 하나가 필요합니다: {}",
        RoleList(policy.roles)
    )))
}

/// 역할 게이트와 소유권 규칙을 함께 평가합니다.
pub fn enforce(
    resource: Resource,
    operation: Operation,
    actor: &AuthenticatedUser,
    owner: Owner<'_>,
) -> AppResult<()> {
    let policy = policy_for(resource, operation);
    authorize(&policy, Some(actor))?;

    let permitted = match policy.ownership {
        Ownership::Unrestricted => true,
        Ownership::Creator => owner.created_by.is_some_and(|id| actor.is(id)),
        Ownership::CreatorOrAdmin => {
            actor.is_admin() || owner.created_by.is_some_and(|id| actor.is(id))
        }
        Ownership::AssigneeOrAdmin => {
            actor.is_admin() || owner.assigned_to.is_some_and(|id| actor.is(id))
        }
    };

    if permitted {
        Ok(())
    } else {
        log::warn!(
            "소유권 검사 실패: actor={} resource={:?} operation={:?}",
            actor.id, resource, operation
        );
        Err(AppError::AuthorizationError(format!(
            "이 {}에 대한 {} 권한이 없습니다",
            resource, operation
        )))
    }
}

struct RoleList(&'static [Role]);

impl fmt::Display for RoleList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(Role::as_str).collect();
        f.write_str(&names.join(", "))
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Profile => "프로필",
            Session => "세션",
            User => "사용자",
            City => "도시",
            Branch => "지점",
            Status => "상태",
            Source => "유입 경로",
            Integration => "연동",
            Candidate => "후보자",
        };
        f.write_str(label)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Create => "생성",
            List => "목록 조회",
            Read => "조회",
            Update => "수정",
            Delete => "삭제",
            Reassign => "담당자 변경",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn identity(role: Role) -> (ObjectId, AuthenticatedUser) {
        let id = ObjectId::new();
        let user = AuthenticatedUser { id: id.to_hex(), email: format!("{}@example.com", role), role };
        (id, user)
    }

    #[test]
    fn test_table_has_no_duplicate_entries() {
        let mut seen = HashSet::new();
        for (resource, operation, _) in POLICIES {
            assert!(seen.insert((*resource, *operation)), "{:?}/{:?} 중복", resource, operation);
        }
    }

    #[test]
    fn test_public_operation_needs_no_identity() {
        assert!(authorize(&policy_for(City, List), None).is_ok());
    }

    #[test]
    fn test_missing_identity_is_unauthorized_before_role_check() {
        let result = authorize(&policy_for(User, Create), None);
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_wrong_role_is_forbidden() {
        let (_, recruiter) = identity(Role::Recruiter);
        let result = authorize(&policy_for(User, Create), Some(&recruiter));
        assert!(matches!(result, Err(AppError::AuthorizationError(_))));
    }

    #[test]
    fn test_creator_rule_applies_to_admins_too() {
        let (creator_id, creator) = identity(Role::Admin);
        let (_, other_admin) = identity(Role::Admin);

        assert!(enforce(Branch, Update, &creator, Owner::created_by(&creator_id)).is_ok());
        assert!(matches!(
            enforce(Branch, Delete, &other_admin, Owner::created_by(&creator_id)),
            Err(AppError::AuthorizationError(_))
        ));
    }

    #[test]
    fn test_candidate_rules() {
        let (recruiter_id, recruiter) = identity(Role::Recruiter);
        let (_, admin) = identity(Role::Admin);
        let someone_else = ObjectId::new();

        let assigned = Owner { created_by: Some(&someone_else), assigned_to: Some(&recruiter_id) };
        let foreign = Owner { created_by: Some(&someone_else), assigned_to: Some(&someone_else) };

        assert!(enforce(Candidate, Read, &recruiter, assigned).is_ok());
        assert!(enforce(Candidate, Read, &recruiter, foreign).is_err());
        assert!(enforce(Candidate, Read, &admin, foreign).is_ok());

        // 담당자여도 생성자가 아니면 수정 불가
        assert!(enforce(Candidate, Update, &recruiter, assigned).is_err());
        assert!(enforce(Candidate, Update, &admin, foreign).is_ok());

        assert!(enforce(Candidate, Reassign, &recruiter, assigned).is_err());
    }

    #[test]
    fn test_undeclared_pair_falls_back_to_strictest() {
        assert_eq!(policy_for(Integration, Reassign), FALLBACK);
    }

    #[test]
    fn test_list_bypass() {
        let (_, admin) = identity(Role::Admin);
        let (_, recruiter) = identity(Role::Recruiter);
        let ownership = policy_for(Candidate, List).ownership;

        assert!(ownership.bypassed_by(&admin));
        assert!(!ownership.bypassed_by(&recruiter));
    }
}
