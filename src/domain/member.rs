use chrono::NaiveDate;

use super::{Credential, Email, MemberId, Role};

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: MemberId,
    pub username: String,
    pub full_name: String,
    pub email: Email,
    pub role: Role,
    pub gender: String,
    pub member_no: String,
    pub date_of_birth: NaiveDate,
    pub member_status: String,
    pub id_no: String,
    pub address: Option<String>,
    pub credential: Credential,
}

/// Creation payload; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub username: String,
    pub full_name: String,
    pub email: Email,
    pub role: Role,
    pub gender: String,
    pub member_no: String,
    pub date_of_birth: NaiveDate,
    pub member_status: String,
    pub id_no: String,
    pub address: Option<String>,
    pub credential: Credential,
}

impl NewMember {
    pub fn into_member(self, id: MemberId) -> Member {
        Member {
            id,
            username: self.username,
            full_name: self.full_name,
            email: self.email,
            role: self.role,
            gender: self.gender,
            member_no: self.member_no,
            date_of_birth: self.date_of_birth,
            member_status: self.member_status,
            id_no: self.id_no,
            address: self.address,
            credential: self.credential,
        }
    }
}

/// Sparse patch: `None` keeps the stored value. `address` is nullable, so
/// clearing it is `Some(None)`.
#[derive(Debug, Clone, Default)]
pub struct MemberUpdate {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<Email>,
    pub role: Option<Role>,
    pub gender: Option<String>,
    pub member_no: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub member_status: Option<String>,
    pub id_no: Option<String>,
    pub address: Option<Option<String>>,
    pub credential: Option<Credential>,
}

impl MemberUpdate {
    pub fn apply(self, member: &mut Member) {
        if let Some(username) = self.username {
            member.username = username;
        }
        if let Some(full_name) = self.full_name {
            member.full_name = full_name;
        }
        if let Some(email) = self.email {
            member.email = email;
        }
        if let Some(role) = self.role {
            member.role = role;
        }
        if let Some(gender) = self.gender {
            member.gender = gender;
        }
        if let Some(member_no) = self.member_no {
            member.member_no = member_no;
        }
        if let Some(date_of_birth) = self.date_of_birth {
            member.date_of_birth = date_of_birth;
        }
        if let Some(member_status) = self.member_status {
            member.member_status = member_status;
        }
        if let Some(id_no) = self.id_no {
            member.id_no = id_no;
        }
        if let Some(address) = self.address {
            member.address = address;
        }
        if let Some(credential) = self.credential {
            member.credential = credential;
        }
    }
}
