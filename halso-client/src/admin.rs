//! Administrative dashboard client
//!
//! One transport shared by the auth context and every resource service, so
//! a login immediately applies to all of them.

use shared::client::AdminPrincipal;
use shared::models::{
    BlogPost, Facility, GymClass, Member, MemberSubscription, SubscriptionPlan, User,
};

use crate::auth::AdminAuth;
use crate::client::{HttpClient, NetworkHttpClient};
use crate::config::ClientConfig;
use crate::lookup::SubscriptionIndex;
use crate::services::{DashboardService, ResourceService};
use crate::session::SessionStore;
use crate::ClientResult;

#[derive(Debug)]
pub struct AdminClient<C: HttpClient + Clone> {
    http: C,
    auth: AdminAuth<C>,
}

impl AdminClient<NetworkHttpClient> {
    /// Network client with the session store from `config`; the stored
    /// session is restored right away
    pub fn connect(config: &ClientConfig) -> ClientResult<Self> {
        let http = config.build_http_client()?;
        let mut client = Self::new(http, SessionStore::in_dir(&config.session_dir));
        client.auth.restore();
        Ok(client)
    }
}

impl<C: HttpClient + Clone> AdminClient<C> {
    pub fn new(http: C, store: SessionStore<AdminPrincipal>) -> Self {
        Self {
            auth: AdminAuth::new(http.clone(), store),
            http,
        }
    }

    pub fn auth(&self) -> &AdminAuth<C> {
        &self.auth
    }

    pub fn auth_mut(&mut self) -> &mut AdminAuth<C> {
        &mut self.auth
    }

    fn service<R: shared::Resource>(&self) -> ResourceService<C, R> {
        ResourceService::new(self.http.clone())
    }

    pub fn members(&self) -> ResourceService<C, Member> {
        self.service()
    }

    pub fn plans(&self) -> ResourceService<C, SubscriptionPlan> {
        self.service()
    }

    pub fn member_subscriptions(&self) -> ResourceService<C, MemberSubscription> {
        self.service()
    }

    pub fn facilities(&self) -> ResourceService<C, Facility> {
        self.service()
    }

    pub fn blog(&self) -> ResourceService<C, BlogPost> {
        self.service()
    }

    pub fn classes(&self) -> ResourceService<C, GymClass> {
        self.service()
    }

    pub fn users(&self) -> ResourceService<C, User> {
        self.service()
    }

    pub fn dashboard(&self) -> DashboardService<C> {
        DashboardService::new(self.http.clone())
    }

    /// Fetch subscriptions and plans together and index them
    pub async fn member_plan_index(&self) -> ClientResult<SubscriptionIndex> {
        let subscriptions = self.member_subscriptions();
        let plans = self.plans();
        let (subscriptions, plans) = tokio::try_join!(subscriptions.get_all(), plans.get_all())?;
        Ok(SubscriptionIndex::build(&subscriptions, &plans))
    }
}
