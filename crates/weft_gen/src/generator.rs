//! The synthesis orchestrator: one run, one interconnect.

use crate::builder::{InterconnectBuilder, SyncKind};
use crate::discover::{self, Endpoint, EndpointSpec, StartingPointSpec};
use crate::error::GenError;
use crate::portmap::{self, SynthesizedMaps};
use crate::roles::{synthesized_mode, EndpointRole};
use std::path::{Path, PathBuf};
use weft_addr::{AddrValue, AddressAllocator, AddressRule};
use weft_config::ResolvedJob;
use weft_library::DocumentLibrary;
use weft_model::{AbstractionDefinition, Design, Vlnv};
use weft_report::Reporter;
use weft_rtl::{ArraySlot, RtlJob, RtlWriter};

/// Drives one synthesis run from endpoints to persisted artifacts.
///
/// The generator owns nothing beyond the run: the library handle and
/// reporter are borrowed from the caller, and the component under
/// construction lives in an [`InterconnectBuilder`] that is moved through
/// the pipeline stages and consumed at the end.
pub struct InterconnectGenerator<'a> {
    library: &'a mut dyn DocumentLibrary,
    reporter: &'a Reporter,
    output_root: PathBuf,
}

impl<'a> InterconnectGenerator<'a> {
    /// Creates a generator writing artifacts under `output_root`.
    pub fn new(
        library: &'a mut dyn DocumentLibrary,
        reporter: &'a Reporter,
        output_root: &Path,
    ) -> Self {
        Self {
            library,
            reporter,
            output_root: output_root.to_path_buf(),
        }
    }

    /// Runs a standalone synthesis: endpoints come from auto-discovery
    /// over the design's connectivity, address regions from the job's
    /// target list.
    pub fn generate_from_config(&mut self, job: &ResolvedJob) -> Result<Vlnv, GenError> {
        let design = self.open_design(job)?;
        let builder = self.create_component(job, design);

        let mut endpoints = discover::discover_endpoints(
            builder.design(),
            &*self.library,
            &job.bus,
            &job.component.name,
            self.reporter,
        )?;
        for endpoint in &mut endpoints {
            if !endpoint.target_side {
                continue;
            }
            if let Some(target) = job.targets.iter().find(|t| t.name == endpoint.instance) {
                endpoint.regions = target.regions.clone();
            }
        }

        self.run_pipeline(job, builder, &endpoints, false)
    }

    /// Runs a synthesis over caller-curated starting points and endpoint
    /// groups; also persists the modified design back.
    pub fn generate_with_endpoints(
        &mut self,
        job: &ResolvedJob,
        starting_points: &[StartingPointSpec],
        endpoints: &[EndpointSpec],
    ) -> Result<Vlnv, GenError> {
        let design = self.open_design(job)?;
        let builder = self.create_component(job, design);

        let endpoints = discover::endpoints_from_specs(
            builder.design(),
            &*self.library,
            &job.design,
            endpoints,
            starting_points,
            self.reporter,
        )?;

        self.run_pipeline(job, builder, &endpoints, true)
    }

    /// Resolves the design component and the design it encompasses.
    fn open_design(&self, job: &ResolvedJob) -> Result<Design, GenError> {
        let design_comp = self.library.component(&job.design)?;
        let design_ref = design_comp
            .design_ref
            .ok_or_else(|| GenError::MissingDesignRef {
                vlnv: job.design.to_string(),
            })?;
        Ok(self.library.design(&design_ref)?)
    }

    /// Discards any same-identity component and starts a fresh builder.
    fn create_component(&mut self, job: &ResolvedJob, design: Design) -> InterconnectBuilder {
        if self.library.contains(&job.component) {
            self.library.remove(&job.component);
        }
        self.reporter.info("creating new component");
        InterconnectBuilder::new(job.component.clone(), design, &job.parameters)
    }

    /// The common pipeline shared by both entry points.
    fn run_pipeline(
        &mut self,
        job: &ResolvedJob,
        mut builder: InterconnectBuilder,
        endpoints: &[Endpoint],
        curated: bool,
    ) -> Result<Vlnv, GenError> {
        // Address allocation comes first: the global address space must
        // exist before any target interface can reference it, and an
        // overlapping map aborts the run before anything is persisted.
        let mut allocator = AddressAllocator::new();
        let mut target_slot = 0u32;
        for endpoint in endpoints.iter().filter(|e| e.role == EndpointRole::Target) {
            allocator.register(target_slot, endpoint.instance.clone(), endpoint.regions.clone());
            target_slot += 1;
        }
        let rules = allocator.build_rules()?;

        if !job.channel {
            if let Some(window) = allocator.global_window() {
                builder.add_global_address_space(
                    format!("{}_global_space", job.bus_tag),
                    AddrValue::Literal(window.size()).to_padded_hex(4),
                    job.widths.address.to_string(),
                );
            }
        }

        let abs_def = self.resolve_bus_abstraction(job);

        for endpoint in endpoints {
            let mode = synthesized_mode(endpoint.declared_mode, endpoint.is_top, job.channel);
            self.reporter.info(format!(
                "creating {} interface",
                endpoint.interface_name
            ));
            let maps = self.synthesize_maps(endpoint, mode, abs_def.as_ref());
            let abstraction = job.bus.with_name(format!("{}.absDef", job.bus.name));
            builder.add_endpoint_interface(endpoint, mode, abstraction, maps);
            if curated {
                builder.wire_endpoint(endpoint);
            }
        }
        builder.finalize_addressing();

        if let Some(reset) = &job.reset {
            self.add_sync_interface(&mut builder, SyncKind::Reset, reset);
        }
        if let Some(clock) = &job.clock {
            self.add_sync_interface(&mut builder, SyncKind::Clock, clock);
        }

        if job.channel {
            builder.group_channel();
        }

        let built = builder.finish();

        let dir = self
            .output_root
            .join(&job.component.vendor)
            .join(&job.component.library)
            .join(&job.component.name)
            .join(&job.component.version);

        self.reporter
            .info(format!("writing component {} to file", built.component.vlnv));
        let mut write_succeeded = true;
        if self.library.write_component(&dir, &built.component).is_err() {
            write_succeeded = false;
        }
        if curated && self.library.write_design(&built.design).is_err() {
            write_succeeded = false;
        }
        if !write_succeeded {
            self.reporter.error("error saving design to disk");
        }

        self.emit_rtl(job, &built.component, &rules, endpoints, &built.clock_port, &built.reset_port, &dir);

        Ok(job.component.clone())
    }

    /// Resolves the fabric bus abstraction used for port mapping.
    ///
    /// A missing abstraction is reported and port mapping degrades to
    /// empty maps; the run itself continues best-effort.
    fn resolve_bus_abstraction(&self, job: &ResolvedJob) -> Option<AbstractionDefinition> {
        let abs_vlnv = job.bus.with_name(format!("{}.absDef", job.bus.name));
        match self.library.abstraction(&abs_vlnv) {
            Ok(def) => Some(def),
            Err(e) => {
                self.reporter
                    .error(format!("cannot resolve abstraction {abs_vlnv}: {e}"));
                None
            }
        }
    }

    /// Synthesizes port maps for one endpoint, degrading to empty maps on
    /// any resolution failure.
    fn synthesize_maps(
        &self,
        endpoint: &Endpoint,
        mode: weft_model::InterfaceMode,
        abs_def: Option<&AbstractionDefinition>,
    ) -> SynthesizedMaps {
        let Some(abs_def) = abs_def else {
            return SynthesizedMaps::default();
        };
        let source = match self.library.component(&endpoint.component_ref) {
            Ok(source) => source,
            Err(e) => {
                self.reporter.error(format!(
                    "cannot resolve component for '{}': {e}",
                    endpoint.instance
                ));
                return SynthesizedMaps::default();
            }
        };
        let Some(source_bus) = source.bus_interface(&endpoint.bus_name) else {
            return SynthesizedMaps::default();
        };
        portmap::synthesize_port_maps(
            abs_def,
            mode,
            &source,
            source_bus,
            &endpoint.prefix(),
            endpoint.is_top,
        )
    }

    /// Resolves a clock/reset abstraction and appends the interface.
    fn add_sync_interface(&self, builder: &mut InterconnectBuilder, kind: SyncKind, bus: &Vlnv) {
        let stem = bus.name.strip_suffix(".abs").unwrap_or(&bus.name);
        let abs_vlnv = bus.with_name(format!("{stem}.absDef"));
        match self.library.abstraction(&abs_vlnv) {
            Ok(def) => builder.add_sync_interface(kind, bus, &def),
            Err(e) => self
                .reporter
                .error(format!("cannot resolve abstraction {abs_vlnv}: {e}")),
        }
    }

    /// Emits the crossbar RTL next to the persisted component.
    ///
    /// RTL write failures after a persisted component are logged, not
    /// raised; the run still yields the component reference.
    #[allow(clippy::too_many_arguments)]
    fn emit_rtl(
        &self,
        job: &ResolvedJob,
        component: &weft_model::Component,
        rules: &[AddressRule],
        endpoints: &[Endpoint],
        clock_port: &Option<String>,
        reset_port: &Option<String>,
        dir: &Path,
    ) {
        let mut targets = Vec::new();
        let mut initiators = Vec::new();
        for endpoint in endpoints {
            match endpoint.role {
                EndpointRole::Target => targets.push(ArraySlot {
                    interface: endpoint.interface_name.clone(),
                    index: targets.len() as u32,
                }),
                EndpointRole::Initiator => initiators.push(ArraySlot {
                    interface: endpoint.interface_name.clone(),
                    index: initiators.len() as u32,
                }),
            }
        }

        let rtl_job = RtlJob {
            component,
            family: job.protocol.clone(),
            widths: job.widths,
            rules,
            targets,
            initiators,
            clock_port: clock_port.clone(),
            reset_port: reset_port.clone(),
        };
        match RtlWriter::write_file(dir, &rtl_job) {
            Ok(path) => self
                .reporter
                .info(format!("wrote RTL to {}", path.display())),
            Err(e) => self.reporter.error(format!("error writing RTL: {e}")),
        }
    }
}
