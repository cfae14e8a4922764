use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

use super::person::text_field;

/// The fixed set of social profiles a person can link to, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, AsRefStr, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SocialNetwork {
    Facebook,
    Twitter,
    Linkedin,
    Instagram,
    Indeed,
    Github,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(from = "RawSocial")]
pub struct Social {
    pub facebook: String,
    pub twitter: String,
    pub linkedin: String,
    pub instagram: String,
    pub indeed: String,
    pub github: String,
}

impl Social {
    pub fn get(&self, network: SocialNetwork) -> &str {
        match network {
            SocialNetwork::Facebook => &self.facebook,
            SocialNetwork::Twitter => &self.twitter,
            SocialNetwork::Linkedin => &self.linkedin,
            SocialNetwork::Instagram => &self.instagram,
            SocialNetwork::Indeed => &self.indeed,
            SocialNetwork::Github => &self.github,
        }
    }

    pub fn set(&mut self, network: SocialNetwork, value: String) {
        let slot = match network {
            SocialNetwork::Facebook => &mut self.facebook,
            SocialNetwork::Twitter => &mut self.twitter,
            SocialNetwork::Linkedin => &mut self.linkedin,
            SocialNetwork::Instagram => &mut self.instagram,
            SocialNetwork::Indeed => &mut self.indeed,
            SocialNetwork::Github => &mut self.github,
        };

        *slot = value;
    }

    /// Values in `SocialNetwork` order, empty entries included
    pub fn values(&self) -> impl Iterator<Item = &str> {
        SocialNetwork::iter().map(move |network| self.get(network))
    }

    pub fn trimmed(&self) -> Social {
        let mut social = Social::default();

        for network in SocialNetwork::iter() {
            social.set(network, self.get(network).trim().to_string());
        }

        social
    }
}

// Unknown networks are dropped, missing ones fall back to empty
#[derive(Deserialize)]
struct RawSocial {
    facebook: Option<Value>,
    twitter: Option<Value>,
    linkedin: Option<Value>,
    instagram: Option<Value>,
    indeed: Option<Value>,
    github: Option<Value>,
}

impl From<RawSocial> for Social {
    fn from(raw: RawSocial) -> Self {
        Social {
            facebook: text_field(raw.facebook),
            twitter: text_field(raw.twitter),
            linkedin: text_field(raw.linkedin),
            instagram: text_field(raw.instagram),
            indeed: text_field(raw.indeed),
            github: text_field(raw.github),
        }
    }
}
