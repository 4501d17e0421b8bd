use crate::error::{Result, ScfError};

use super::{
    index::{self, IntegralIndex},
    IntegralProvider,
};

/// An electron tensor caching the electron-electron repulsion integrals between four
/// basis functions.
///
/// Only one value per permutation class is stored (see [`index`]). Values are evaluated
/// lazily: the first request for a class asks the provider, every later request for any
/// permutation of it is served from the cache.
pub struct ElectronTensor<P> {
    provider: P,
    values: Vec<f64>,
    filled: Vec<bool>,
    /// side length
    n_basis: usize,
    evaluations: usize,
}

impl<P: IntegralProvider> ElectronTensor<P> {
    /// Creates an empty tensor sized for the basis of `provider`. No integrals are
    /// evaluated yet.
    pub fn new(provider: P) -> Self {
        let n_basis = provider.n_basis();
        let size = index::n_canonical(n_basis);

        Self {
            provider,
            values: vec![0.0; size],
            filled: vec![false; size],
            n_basis,
            evaluations: 0,
        }
    }

    pub fn n_basis(&self) -> usize {
        self.n_basis
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Number of times the provider was asked for a repulsion integral.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Whether every class has been evaluated.
    pub fn is_complete(&self) -> bool {
        self.filled.iter().all(|&filled| filled)
    }

    /// Returns (ij|kl), evaluating it with the provider if no permutation of it has been
    /// requested before. The provider receives the indices exactly as given here.
    pub fn get(&mut self, i: usize, j: usize, k: usize, l: usize) -> Result<f64> {
        let index = IntegralIndex(i, j, k, l);
        let slot = self.slot(index)?;

        if !self.filled[slot] {
            let integral = self.provider.repulsion(i, j, k, l)?;
            log::trace!("ERI {index} = {integral:<1.8}");

            self.values[slot] = integral;
            self.filled[slot] = true;
            self.evaluations += 1;
        }

        Ok(self.values[slot])
    }

    /// Returns (ij|kl) if it has already been evaluated.
    pub fn cached(&self, i: usize, j: usize, k: usize, l: usize) -> Result<Option<f64>> {
        let slot = self.slot(IntegralIndex(i, j, k, l))?;
        Ok(self.filled[slot].then(|| self.values[slot]))
    }

    /// Evaluates every class that hasn't been evaluated yet. Each class is visited
    /// exactly once through its representative quadruple.
    pub fn fill(&mut self) -> Result<()> {
        for IntegralIndex(i, j, k, l) in index::representatives(self.n_basis) {
            self.get(i, j, k, l)?;
        }

        log::debug!(
            "electron tensor holds {} unique integrals ({} evaluations)",
            self.values.len(),
            self.evaluations
        );
        Ok(())
    }

    fn slot(&self, index: IntegralIndex) -> Result<usize> {
        if !index.fits(self.n_basis) {
            return Err(ScfError::IndexOutOfRange {
                index: index.as_tuple(),
                n_basis: self.n_basis,
            });
        }

        Ok(index.canonical())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use nalgebra::Vector3;
    use rand::{seq::SliceRandom, SeedableRng};

    use crate::{
        error::{IntegralError, ScfError},
        integrals::{index, IntegralProvider},
    };

    use super::ElectronTensor;

    /// Provider that counts calls and returns a value unique to each class.
    struct CountingProvider {
        n_basis: usize,
        calls: Cell<usize>,
        arguments: RefCell<Vec<(usize, usize, usize, usize)>>,
    }

    impl CountingProvider {
        fn new(n_basis: usize) -> Self {
            Self {
                n_basis,
                calls: Cell::new(0),
                arguments: RefCell::new(Vec::new()),
            }
        }
    }

    impl IntegralProvider for CountingProvider {
        fn n_basis(&self) -> usize {
            self.n_basis
        }

        fn overlap(&self, _: usize, _: usize) -> Result<f64, IntegralError> {
            Ok(0.0)
        }

        fn kinetic(&self, _: usize, _: usize) -> Result<f64, IntegralError> {
            Ok(0.0)
        }

        fn nuclear(&self, _: usize, _: usize, _: &Vector3<f64>, _: f64) -> Result<f64, IntegralError> {
            Ok(0.0)
        }

        fn repulsion(&self, a: usize, b: usize, c: usize, d: usize) -> Result<f64, IntegralError> {
            self.calls.set(self.calls.get() + 1);
            self.arguments.borrow_mut().push((a, b, c, d));
            Ok(index::canonical_index(a, b, c, d) as f64 + 0.5)
        }
    }

    struct FailingProvider;

    impl IntegralProvider for FailingProvider {
        fn n_basis(&self) -> usize {
            2
        }

        fn overlap(&self, _: usize, _: usize) -> Result<f64, IntegralError> {
            Ok(1.0)
        }

        fn kinetic(&self, _: usize, _: usize) -> Result<f64, IntegralError> {
            Ok(1.0)
        }

        fn nuclear(&self, _: usize, _: usize, _: &Vector3<f64>, _: f64) -> Result<f64, IntegralError> {
            Ok(1.0)
        }

        fn repulsion(&self, a: usize, _: usize, _: usize, _: usize) -> Result<f64, IntegralError> {
            Err(IntegralError::EmptyContraction { function: a })
        }
    }

    #[test]
    fn provider_is_called_once_per_class() {
        let n_basis = 4;
        let provider = CountingProvider::new(n_basis);
        let mut tensor = ElectronTensor::new(&provider);

        // every quadruple, twice, in a shuffled order
        let mut quadruples =
            itertools::iproduct!(0..n_basis, 0..n_basis, 0..n_basis, 0..n_basis).collect::<Vec<_>>();
        quadruples.extend(quadruples.clone());
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        quadruples.shuffle(&mut rng);

        for (i, j, k, l) in quadruples {
            let value = tensor.get(i, j, k, l).unwrap();
            assert_eq!(value, index::canonical_index(i, j, k, l) as f64 + 0.5);
        }

        assert_eq!(provider.calls.get(), index::n_canonical(n_basis));
        assert_eq!(tensor.evaluations(), index::n_canonical(n_basis));
        assert!(tensor.is_complete());
    }

    #[test]
    fn first_caller_arguments_reach_the_provider() {
        let provider = CountingProvider::new(3);
        let mut tensor = ElectronTensor::new(&provider);

        tensor.get(2, 1, 0, 2).unwrap();
        tensor.get(1, 2, 2, 0).unwrap();

        assert_eq!(*provider.arguments.borrow(), vec![(2, 1, 0, 2)]);
    }

    #[test]
    fn fill_evaluates_each_class_once() {
        let provider = CountingProvider::new(5);
        let mut tensor = ElectronTensor::new(&provider);

        tensor.get(0, 0, 0, 0).unwrap();
        tensor.fill().unwrap();
        tensor.fill().unwrap();

        assert_eq!(provider.calls.get(), index::n_canonical(5));
        assert_eq!(tensor.cached(4, 3, 2, 1).unwrap(), Some(index::canonical_index(1, 2, 3, 4) as f64 + 0.5));
    }

    #[test]
    fn cached_does_not_evaluate() {
        let provider = CountingProvider::new(2);
        let tensor = ElectronTensor::new(&provider);

        assert_eq!(tensor.cached(0, 1, 1, 0).unwrap(), None);
        assert_eq!(provider.calls.get(), 0);
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let provider = CountingProvider::new(2);
        let mut tensor = ElectronTensor::new(&provider);

        assert_eq!(
            tensor.get(0, 1, 2, 0),
            Err(ScfError::IndexOutOfRange {
                index: (0, 1, 2, 0),
                n_basis: 2
            })
        );
        assert_eq!(provider.calls.get(), 0);
    }

    #[test]
    fn provider_errors_are_passed_on() {
        let mut tensor = ElectronTensor::new(FailingProvider);

        assert_eq!(
            tensor.fill(),
            Err(ScfError::IntegralProvider(IntegralError::EmptyContraction { function: 0 }))
        );
        assert_eq!(tensor.cached(0, 0, 0, 0).unwrap(), None);
    }
}
