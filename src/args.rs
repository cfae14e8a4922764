use clap::Args;
use database::model::{draft::PersonDraft, social::SocialNetwork};
use strum::IntoEnumIterator;

/// Form fields. Anything left out keeps the value already in the draft
#[derive(Args, Debug, Default, Clone)]
pub struct PersonArgs {
    /// Id to save under. Left blank on add, one is generated
    #[clap(long)]
    pub id: Option<String>,

    #[clap(short, long)]
    pub name: Option<String>,

    #[clap(long)]
    pub age: Option<u32>,

    /// Clear a saved age
    #[clap(long, conflicts_with = "age")]
    pub no_age: bool,

    #[clap(long)]
    pub phone: Option<String>,

    #[clap(long)]
    pub email: Option<String>,

    #[clap(long)]
    pub address: Option<String>,

    /// Image url shown instead of the initials
    #[clap(long)]
    pub avatar: Option<String>,

    #[clap(long)]
    pub freelancer_id: Option<String>,

    #[clap(long)]
    pub facebook: Option<String>,

    #[clap(long)]
    pub twitter: Option<String>,

    #[clap(long)]
    pub linkedin: Option<String>,

    #[clap(long)]
    pub instagram: Option<String>,

    #[clap(long)]
    pub indeed: Option<String>,

    #[clap(long)]
    pub github: Option<String>,
}

impl PersonArgs {
    fn social(&self, network: SocialNetwork) -> &Option<String> {
        match network {
            SocialNetwork::Facebook => &self.facebook,
            SocialNetwork::Twitter => &self.twitter,
            SocialNetwork::Linkedin => &self.linkedin,
            SocialNetwork::Instagram => &self.instagram,
            SocialNetwork::Indeed => &self.indeed,
            SocialNetwork::Github => &self.github,
        }
    }

    pub fn apply(&self, mut draft: PersonDraft) -> PersonDraft {
        fn set(target: &mut String, value: &Option<String>) {
            if let Some(value) = value {
                *target = value.clone();
            }
        }

        if self.id.is_some() {
            draft.id = self.id.clone();
        }

        if self.no_age {
            draft.age = None;
        } else if self.age.is_some() {
            draft.age = self.age;
        }

        set(&mut draft.name, &self.name);
        set(&mut draft.phone, &self.phone);
        set(&mut draft.email, &self.email);
        set(&mut draft.address, &self.address);
        set(&mut draft.avatar, &self.avatar);
        set(&mut draft.freelancer_id, &self.freelancer_id);

        for network in SocialNetwork::iter() {
            if let Some(value) = self.social(network) {
                draft.social.set(network, value.clone());
            }
        }

        draft
    }
}
