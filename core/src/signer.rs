use crate::{Context, Error, ProvideCredential, Result, SignRequest, SigningCredential};
use std::sync::{Arc, Mutex};

/// Signer is the main struct used to sign the request.
///
/// The last valid credential is cached and reused until it becomes invalid.
#[derive(Clone, Debug)]
pub struct Signer<C: SigningCredential> {
    ctx: Context,
    loader: Arc<dyn ProvideCredential<Credential = C>>,
    builder: Arc<dyn SignRequest<Credential = C>>,
    credential: Arc<Mutex<Option<C>>>,
}

impl<C: SigningCredential> Signer<C> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        loader: impl ProvideCredential<Credential = C>,
        builder: impl SignRequest<Credential = C>,
    ) -> Self {
        Self {
            ctx,

            loader: Arc::new(loader),
            builder: Arc::new(builder),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// Replace the credential provider, dropping any cached credential.
    pub fn with_credential_provider(
        mut self,
        provider: impl ProvideCredential<Credential = C>,
    ) -> Self {
        self.loader = Arc::new(provider);
        self.credential = Arc::new(Mutex::new(None));
        self
    }

    /// Signing request.
    pub async fn sign(&self, req: &mut http::request::Parts) -> Result<()> {
        let cached = self.credential.lock().expect("lock poisoned").clone();
        let cred = if cached.is_valid() {
            cached
        } else {
            let loaded = self.loader.provide_credential(&self.ctx).await?;
            *self.credential.lock().expect("lock poisoned") = loaded.clone();
            loaded
        };

        let Some(cred) = cred.filter(|c| c.is_valid()) else {
            return Err(Error::credential_invalid(
                "no valid credential found, please check configuration",
            ));
        };

        self.builder.sign_request(&self.ctx, req, &cred).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug)]
    struct TestCredential(String);

    impl SigningCredential for TestCredential {
        fn is_valid(&self) -> bool {
            !self.0.is_empty()
        }
    }

    #[derive(Debug)]
    struct TestLoader {
        value: &'static str,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl ProvideCredential for TestLoader {
        type Credential = TestCredential;

        async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(TestCredential(self.value.to_string())))
        }
    }

    #[derive(Debug)]
    struct HeaderSigner;

    #[async_trait::async_trait]
    impl SignRequest for HeaderSigner {
        type Credential = TestCredential;

        async fn sign_request(
            &self,
            _: &Context,
            req: &mut http::request::Parts,
            cred: &Self::Credential,
        ) -> Result<()> {
            req.headers.insert("x-test-credential", cred.0.parse()?);
            Ok(())
        }
    }

    fn parts() -> http::request::Parts {
        http::Request::get("https://cloudfront.amazonaws.com/2010-11-01/distribution")
            .body(())
            .expect("request must be valid")
            .into_parts()
            .0
    }

    #[tokio::test]
    async fn test_signer_caches_credential() -> Result<()> {
        let calls = Arc::new(AtomicUsize::new(0));
        let signer = Signer::new(
            Context::new(),
            TestLoader {
                value: "cached",
                calls: calls.clone(),
            },
            HeaderSigner,
        );

        let mut req = parts();
        signer.sign(&mut req).await?;
        signer.sign(&mut parts()).await?;

        assert_eq!(req.headers["x-test-credential"], "cached");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_signer_rejects_invalid_credential() {
        let calls = Arc::new(AtomicUsize::new(0));
        let signer = Signer::new(
            Context::new(),
            TestLoader {
                value: "",
                calls: calls.clone(),
            },
            HeaderSigner,
        );

        let mut req = parts();
        let err = signer.sign(&mut req).await.unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::CredentialInvalid);
        assert!(req.headers.get("x-test-credential").is_none());

        // Invalid credentials are never cached.
        let _ = signer.sign(&mut req).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_signer_with_credential_provider() -> Result<()> {
        let calls = Arc::new(AtomicUsize::new(0));
        let signer = Signer::new(
            Context::new(),
            TestLoader {
                value: "first",
                calls: calls.clone(),
            },
            HeaderSigner,
        );
        signer.sign(&mut parts()).await?;

        let signer = signer.with_credential_provider(TestLoader {
            value: "second",
            calls: calls.clone(),
        });
        let mut req = parts();
        signer.sign(&mut req).await?;

        assert_eq!(req.headers["x-test-credential"], "second");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        Ok(())
    }
}
