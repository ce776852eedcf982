//! Main token service implementation

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::domain::entities::token::{Claims, SECONDS_PER_DAY};
use crate::errors::{TokenError, TokenResult};

use super::config::TokenServiceConfig;

/// The only algorithm tokens may be signed or verified with
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Header fields inspected before the signature is checked
#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Service for issuing and checking HS256 bearer tokens
///
/// Holds only immutable key material and is safe to share across threads.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `config` - Token service configuration
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // Expiration is checked by `verify_at` so that an expired token is a
        // `false` result rather than a decode error.
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Configured token lifetime in seconds
    pub fn lifetime_seconds(&self) -> i64 {
        self.config.lifetime_days.saturating_mul(SECONDS_PER_DAY)
    }

    /// Issues a signed token carrying `claims`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The encoded token
    /// * `Err(TokenError::Signing)` - A claim has no JSON encoding, or the signing step failed
    pub fn issue(&self, claims: &Claims) -> TokenResult<String> {
        self.issue_at(claims, Utc::now())
    }

    /// Issues a token as if the current time were `now`
    ///
    /// Any `exp` supplied by the caller is replaced with `now + lifetime`.
    pub fn issue_at(&self, claims: &Claims, now: DateTime<Utc>) -> TokenResult<String> {
        if let Some((key, value)) = claims.iter().find(|(_, value)| !value.is_representable()) {
            warn!(claim = %key, "Refusing to sign a non-finite claim value");
            return Err(TokenError::Signing {
                reason: format!("claim {key} has no JSON encoding: {value}"),
            });
        }

        let mut claims = claims.clone();
        claims.set_expiration(now.timestamp().saturating_add(self.lifetime_seconds()));

        let header = Header::new(SIGNING_ALGORITHM);
        let token = encode(&header, &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "Failed to sign token");
            TokenError::Signing {
                reason: e.to_string(),
            }
        })?;

        debug!(claims = claims.len(), "Issued token");
        Ok(token)
    }

    /// Verifies signature, structure and expiration of a token
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The token is valid
    /// * `Ok(false)` - The token is well-formed and signed but expired
    /// * `Err(TokenError)` - The token is malformed, tampered, or uses another algorithm
    pub fn verify(&self, token: &str) -> TokenResult<bool> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies a token as if the current time were `now`
    ///
    /// A token whose `exp` equals the current second is still valid.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> TokenResult<bool> {
        let claims = self.decode_claims(token)?;
        Ok(!Self::is_expired(&claims, now)?)
    }

    /// Extracts the claims of a correctly signed token
    ///
    /// Expiration is not checked; call [`TokenService::verify`] first when
    /// validity matters.
    pub fn parse(&self, token: &str) -> TokenResult<Claims> {
        self.decode_claims(token)
    }

    /// Verifies and extracts in one decode
    ///
    /// Returns `Ok(None)` for an expired token.
    pub fn verify_and_parse(&self, token: &str) -> TokenResult<Option<Claims>> {
        self.verify_and_parse_at(token, Utc::now())
    }

    /// Combined verification and extraction as if the current time were `now`
    pub fn verify_and_parse_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> TokenResult<Option<Claims>> {
        let claims = self.decode_claims(token)?;
        if Self::is_expired(&claims, now)? {
            return Ok(None);
        }
        Ok(Some(claims))
    }

    fn is_expired(claims: &Claims, now: DateTime<Utc>) -> TokenResult<bool> {
        let exp = claims
            .expiration()
            .ok_or_else(|| TokenError::invalid("missing or non-numeric exp claim"))?;
        Ok(now.timestamp() > exp)
    }

    /// Decodes a token and checks its signature
    fn decode_claims(&self, token: &str) -> TokenResult<Claims> {
        self.check_signing_method(token)?;

        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                // The signature has already been checked when the payload fails to deserialize
                ErrorKind::Json(_) => {
                    debug!(error = %e, "Token claims have an unexpected shape");
                    TokenError::invalid("claims must be an object of scalar values")
                }
                _ => {
                    debug!(error = %e, "Token failed to decode");
                    TokenError::MalformedToken
                }
            })?;

        Ok(token_data.claims)
    }

    /// Rejects tokens whose header names any algorithm but [`SIGNING_ALGORITHM`]
    ///
    /// Runs on the raw header so that `none` and unknown names surface as a
    /// mismatch rather than a parse failure. Any other header that does not
    /// parse is malformed.
    fn check_signing_method(&self, token: &str) -> TokenResult<()> {
        let mut segments = token.split('.');
        let header_segment = match (segments.next(), segments.next(), segments.next(), segments.next()) {
            (Some(header), Some(_), Some(_), None) => header,
            _ => return Err(TokenError::MalformedToken),
        };

        let header_bytes = URL_SAFE_NO_PAD
            .decode(header_segment)
            .map_err(|_| TokenError::MalformedToken)?;
        let algorithm = match serde_json::from_slice::<Header>(&header_bytes) {
            Ok(header) if header.alg == SIGNING_ALGORITHM => return Ok(()),
            Ok(header) => format!("{:?}", header.alg),
            Err(e) => {
                let raw: RawHeader = serde_json::from_slice(&header_bytes).map_err(|_| {
                    debug!(error = %e, "Rejected token header");
                    TokenError::MalformedToken
                })?;
                if raw.alg.parse::<Algorithm>().ok() == Some(SIGNING_ALGORITHM) {
                    debug!(error = %e, "Rejected token header");
                    return Err(TokenError::MalformedToken);
                }
                raw.alg
            }
        };

        warn!(%algorithm, "Rejected token with unexpected signing method");
        Err(TokenError::SigningMethodMismatch { algorithm })
    }
}
