//! Generic list/show/add/edit/delete over one admin collection

use anyhow::{Context, bail};
use halso_client::{
    EntityId, FormController, HttpClient, ListView, LoadState, Resource, ResourceService, Toaster,
};
use shared::models::{
    BlogPostDraft, FacilityDraft, GymClassDraft, MemberDraft, MemberSubscriptionDraft,
    SubscriptionPlanDraft, UserDraft, Weekday,
};
use shared::util::today;

use crate::cli::{
    ClassFields, Crud, FacilityFields, MemberFields, PlanFields, PostFields, SubscriptionFields,
    UserFields,
};
use crate::render::{self, Row};

/// Command line flags that fill in a form draft `D`
pub trait ApplyFields<D> {
    /// Values a new draft starts with beyond `D::default()`
    fn prefill(_draft: &mut D) {}

    /// Overwrite the draft with every flag that was given
    fn apply(self, draft: &mut D);
}

pub async fn run<C, R, F>(
    service: &ResourceService<C, R>,
    command: Crud<F>,
    toaster: &mut Toaster,
) -> anyhow::Result<()>
where
    C: HttpClient,
    R: Resource + Row,
    F: ApplyFields<R::Draft>,
{
    let mut list = load(service, toaster).await?;
    let mut form = FormController::<R>::new();

    match command {
        Crud::List(args) => render::table(&list.visible(args.term())),
        Crud::Show(id) => render::record(find(&list, &id)?),
        Crud::Add(fields) => {
            let draft = form.open_create();
            F::prefill(draft);
            fields.apply(draft);
            let created = form.submit(service, &mut list, toaster).await?;
            render::record(&created);
        }
        Crud::Edit(id, fields) => {
            let entity = find(&list, &id)?.clone();
            fields.apply(form.open_edit(&entity));
            let updated = form.submit(service, &mut list, toaster).await?;
            render::record(&updated);
        }
        Crud::Delete(id) => list.delete(service, &id, toaster).await?,
    }
    Ok(())
}

/// Fetch a whole collection into a list view; a failed load is an error
pub async fn load<C: HttpClient, R: Resource>(
    service: &ResourceService<C, R>,
    toaster: &mut Toaster,
) -> anyhow::Result<ListView<R>> {
    let mut list = ListView::new();
    list.load_from(service, toaster).await;
    if let LoadState::Failed(message) = list.state() {
        bail!("{} list unavailable: {}", R::NAME, message);
    }
    Ok(list)
}

fn find<'a, R: Resource>(list: &'a ListView<R>, id: &EntityId) -> anyhow::Result<&'a R> {
    list.find(id)
        .with_context(|| format!("no {} with id {}", R::NAME.to_lowercase(), id))
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn set_some<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

impl ApplyFields<MemberDraft> for MemberFields {
    fn prefill(draft: &mut MemberDraft) {
        draft.join_date = today();
    }

    fn apply(self, draft: &mut MemberDraft) {
        set(&mut draft.name, self.name);
        set(&mut draft.email, self.email);
        set_some(&mut draft.phone, self.phone);
        set(&mut draft.membership_status, self.status);
        set(&mut draft.join_date, self.join_date);
        set_some(&mut draft.facility_id, self.facility);
    }
}

impl ApplyFields<SubscriptionPlanDraft> for PlanFields {
    fn apply(self, draft: &mut SubscriptionPlanDraft) {
        set(&mut draft.name, self.name);
        set_some(&mut draft.description, self.description);
        set(&mut draft.price, self.price);
        set(&mut draft.duration, self.duration);
        if let Some(features) = self.features {
            draft.set_features_from_input(&features);
        }
        set(&mut draft.is_active, self.active);
    }
}

impl ApplyFields<MemberSubscriptionDraft> for SubscriptionFields {
    fn prefill(draft: &mut MemberSubscriptionDraft) {
        draft.start_date = Some(today());
    }

    fn apply(self, draft: &mut MemberSubscriptionDraft) {
        set_some(&mut draft.member_id, self.member);
        set_some(&mut draft.plan_id, self.plan);
        set(&mut draft.status, self.status);
        set(&mut draft.payment_status, self.payment);
        set_some(&mut draft.start_date, self.start_date);
        set_some(&mut draft.end_date, self.end_date);
    }
}

impl ApplyFields<FacilityDraft> for FacilityFields {
    fn apply(self, draft: &mut FacilityDraft) {
        set(&mut draft.name, self.name);
        set(&mut draft.address, self.address);
        set(&mut draft.city, self.city);
        set_some(&mut draft.postal_code, self.postal_code);
        set_some(&mut draft.country, self.country);
        set_some(&mut draft.phone, self.phone);
        set_some(&mut draft.email, self.email);
        set(&mut draft.status, self.status);
    }
}

impl ApplyFields<UserDraft> for UserFields {
    fn apply(self, draft: &mut UserDraft) {
        set(&mut draft.username, self.username);
        set(&mut draft.email, self.email);
        set(&mut draft.role, self.role);
        set(&mut draft.is_active, self.active);
        set_some(&mut draft.password, self.password);
    }
}

impl ApplyFields<BlogPostDraft> for PostFields {
    fn apply(self, draft: &mut BlogPostDraft) {
        set(&mut draft.title, self.title);
        set(&mut draft.content, self.content);
        set_some(&mut draft.excerpt, self.excerpt);
        set_some(&mut draft.author, self.author);
        set(&mut draft.status, self.status);
        if let Some(tags) = self.tags {
            draft.set_tags_from_input(&tags);
        }
    }
}

impl ApplyFields<GymClassDraft> for ClassFields {
    fn apply(self, draft: &mut GymClassDraft) {
        set(&mut draft.name, self.name);
        set_some(&mut draft.description, self.description);
        set_some(&mut draft.instructor, self.instructor);
        set_some(&mut draft.facility_id, self.facility);
        set(&mut draft.day_of_week, self.day.map(Weekday::index));
        set(&mut draft.start_time, self.start);
        set(&mut draft.end_time, self.end);
        set(&mut draft.capacity, self.capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Member, MembershipStatus, SubscriptionStatus};
    use shared::{Draft, FormMode};

    #[test]
    fn test_edit_keeps_fields_not_given() {
        let member = Member {
            id: EntityId::from("m1"),
            name: "Anna Berg".to_string(),
            email: "anna@example.se".to_string(),
            phone: Some("070-1234567".to_string()),
            membership_status: MembershipStatus::Active,
            join_date: "2024-01-15".to_string(),
            facility_id: None,
        };
        let mut draft = MemberDraft::from_entity(&member);
        MemberFields {
            status: Some(MembershipStatus::Suspended),
            ..Default::default()
        }
        .apply(&mut draft);

        assert_eq!(draft.membership_status, MembershipStatus::Suspended);
        assert_eq!(draft.name, "Anna Berg");
        assert_eq!(draft.phone.as_deref(), Some("070-1234567"));
        assert_eq!(draft.join_date, "2024-01-15");
    }

    #[test]
    fn test_new_subscription_starts_today_and_needs_ids() {
        let mut draft = MemberSubscriptionDraft::default();
        SubscriptionFields::prefill(&mut draft);
        SubscriptionFields {
            member: Some(EntityId::from("m2")),
            status: Some(SubscriptionStatus::Pending),
            ..Default::default()
        }
        .apply(&mut draft);

        assert_eq!(draft.start_date, Some(today()));
        assert_eq!(draft.member_id, Some(EntityId::from("m2")));
        let violations = draft.validate(FormMode::Create);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "planId");
    }

    #[test]
    fn test_class_day_and_features_from_flags() {
        let mut class = GymClassDraft::default();
        ClassFields {
            day: Some(Weekday::Sunday),
            start: Some("07:00".to_string()),
            ..Default::default()
        }
        .apply(&mut class);
        assert_eq!(class.day_of_week, 0);
        assert_eq!(class.start_time, "07:00");
        assert_eq!(class.end_time, "10:00");

        let mut plan = SubscriptionPlanDraft::default();
        PlanFields {
            features: Some("Sauna, Pool".to_string()),
            ..Default::default()
        }
        .apply(&mut plan);
        assert_eq!(plan.features, vec!["Sauna", "Pool"]);
    }
}
