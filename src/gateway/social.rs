//! Follow relations and follow requests.

use super::{segment, NetworkGateway};
use crate::error::GastroResult;
use crate::models::UserSummary;

/// Which side of the follow relation to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationList {
    Followers,
    Following,
}

impl RelationList {
    fn path_segment(&self) -> &'static str {
        match self {
            RelationList::Followers => "seguidores",
            RelationList::Following => "siguiendo",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RelationList::Followers => "Followers",
            RelationList::Following => "Following",
        }
    }
}

impl NetworkGateway {
    /// `POST /relaciones/seguir/{username}`.
    pub async fn follow(&self, username: &str) -> GastroResult<()> {
        self.post_empty(&format!("/relaciones/seguir/{}", segment(username)))
            .await?;
        Ok(())
    }

    /// `DELETE /relaciones/dejar-de-seguir/{username}`.
    pub async fn unfollow(&self, username: &str) -> GastroResult<()> {
        self.delete(&format!("/relaciones/dejar-de-seguir/{}", segment(username)))
            .await?;
        Ok(())
    }

    /// `GET /relaciones/solicitudes/pendientes`.
    pub async fn pending_requests(&self) -> GastroResult<Vec<UserSummary>> {
        self.get_json("/relaciones/solicitudes/pendientes").await
    }

    /// `POST /relaciones/solicitudes/aceptar/{username}`.
    pub async fn accept_request(&self, username: &str) -> GastroResult<()> {
        self.post_empty(&format!(
            "/relaciones/solicitudes/aceptar/{}",
            segment(username)
        ))
        .await?;
        Ok(())
    }

    /// `POST /relaciones/solicitudes/rechazar/{username}`.
    pub async fn reject_request(&self, username: &str) -> GastroResult<()> {
        self.post_empty(&format!(
            "/relaciones/solicitudes/rechazar/{}",
            segment(username)
        ))
        .await?;
        Ok(())
    }

    /// Followers or followed accounts of the current user (`owner == None`)
    /// or of another user.
    pub async fn relations(
        &self,
        list: RelationList,
        owner: Option<&str>,
    ) -> GastroResult<Vec<UserSummary>> {
        let path = match owner {
            None => format!("/relaciones/{}", list.path_segment()),
            Some(user) => format!("/relaciones/{}/{}", segment(user), list.path_segment()),
        };
        self.get_json(&path).await
    }

    /// `DELETE /relaciones/seguidores/{username}`.
    pub async fn remove_follower(&self, username: &str) -> GastroResult<()> {
        self.delete(&format!("/relaciones/seguidores/{}", segment(username)))
            .await?;
        Ok(())
    }
}
