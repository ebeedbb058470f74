//! Member portal client

use shared::client::MemberPrincipal;
use shared::models::{GymClass, SubscriptionPlan};

use crate::auth::MemberAuth;
use crate::client::{HttpClient, NetworkHttpClient};
use crate::config::ClientConfig;
use crate::schedule::WeeklySchedule;
use crate::services::ResourceService;
use crate::session::SessionStore;
use crate::ClientResult;

#[derive(Debug)]
pub struct MemberPortal<C: HttpClient + Clone> {
    auth: MemberAuth<C>,
    classes: ResourceService<C, GymClass>,
    plans: ResourceService<C, SubscriptionPlan>,
}

impl MemberPortal<NetworkHttpClient> {
    /// Network client with the session store from `config`; the stored
    /// session is restored right away
    pub fn connect(config: &ClientConfig) -> ClientResult<Self> {
        let http = config.build_http_client()?;
        let mut portal = Self::new(http, SessionStore::in_dir(&config.session_dir));
        portal.auth.restore();
        Ok(portal)
    }
}

impl<C: HttpClient + Clone> MemberPortal<C> {
    pub fn new(http: C, store: SessionStore<MemberPrincipal>) -> Self {
        Self {
            auth: MemberAuth::new(http.clone(), store),
            classes: ResourceService::new(http.clone()),
            plans: ResourceService::new(http),
        }
    }

    pub fn auth(&self) -> &MemberAuth<C> {
        &self.auth
    }

    pub fn auth_mut(&mut self) -> &mut MemberAuth<C> {
        &mut self.auth
    }

    /// Every class, in server order
    pub async fn classes(&self) -> ClientResult<Vec<GymClass>> {
        self.classes.get_all().await
    }

    pub async fn weekly_schedule(&self) -> ClientResult<WeeklySchedule> {
        let classes = self.classes().await?;
        Ok(WeeklySchedule::build(&classes))
    }

    /// Plans open for sign-up
    pub async fn plans(&self) -> ClientResult<Vec<SubscriptionPlan>> {
        let mut plans = self.plans.get_all().await?;
        plans.retain(|plan| plan.is_active);
        Ok(plans)
    }
}
